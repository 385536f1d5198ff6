//! Status command - Inspect a level's trained table

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::{AgentParams, App, LevelsConfig, LevelService},
    cli::output::{format_number, print_kv, print_section},
};

#[derive(Parser, Debug)]
#[command(about = "Show episode count and table size for a level")]
pub struct StatusArgs {
    /// Level to inspect
    #[arg(long, short = 'l', default_value = "default")]
    pub level: String,

    /// Directory holding level artifacts
    #[arg(long, default_value = "models")]
    pub model_dir: PathBuf,
}

pub fn execute(args: StatusArgs) -> Result<()> {
    let levels = LevelsConfig::from_dir(&args.model_dir, &[args.level.as_str()]);
    let service = LevelService::new(App::new(), levels, AgentParams::new(), &args.level)?;

    let status = service.status();

    print_section(&format!("Level '{}'", status.level));
    print_kv("Total episodes", &format_number(status.total_episodes));
    print_kv(
        "Known states",
        &format_number(status.known_states as u64),
    );
    print_kv(
        "Model loaded",
        if status.model_loaded { "yes" } else { "no" },
    );

    Ok(())
}
