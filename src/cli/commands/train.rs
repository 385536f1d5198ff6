//! Train command - Run self-play episodes for a level

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    app::{AgentParams, App, LevelsConfig, LevelService},
    cli::output::{format_number, print_kv, print_section},
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline},
    types::Hyperparameters,
};

#[derive(Parser, Debug)]
#[command(about = "Train a level via self-play")]
pub struct TrainArgs {
    /// Level to train
    #[arg(long, short = 'l', default_value = "default")]
    pub level: String,

    /// Directory holding level artifacts (one JSON file per level)
    #[arg(long, default_value = "models")]
    pub model_dir: PathBuf,

    /// Additional self-play episodes to run on top of the current total
    #[arg(long, short = 'e', default_value_t = 1000, conflicts_with = "target")]
    pub episodes: u64,

    /// Cumulative episode target; episodes already run count toward it
    #[arg(long, short = 't')]
    pub target: Option<u64>,

    /// Learning rate α (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration rate ε (0.0-1.0)
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

fn agent_params(args: &TrainArgs) -> Result<AgentParams> {
    let hyper = Hyperparameters::new(args.alpha, args.gamma, args.epsilon)
        .map_err(|e| anyhow!("invalid hyperparameters: {e}"))?;

    let mut params = AgentParams::new().with_hyperparameters(hyper);
    if let Some(seed) = args.seed {
        params = params.with_seed(seed);
    }
    Ok(params)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let params = agent_params(&args)?;
    let app = App::new();
    let levels = LevelsConfig::from_dir(&args.model_dir, &[args.level.as_str()]);

    // Target mode delegates to the idempotent service operation
    if let Some(target) = args.target {
        let service = LevelService::new(app, levels, params, &args.level)?;
        let outcome = service.train_to_target(target)?;

        print_section(&format!("Training '{}' to target", args.level));
        print_kv("Requested target", &format_number(outcome.requested_target));
        print_kv("Episodes run", &format_number(outcome.episodes_run));
        print_kv("Total episodes", &format_number(outcome.total_episodes));
        if outcome.episodes_run == 0 {
            println!("\nTarget already reached; nothing to do.");
        }
        return Ok(());
    }

    // Episode mode runs the pipeline directly so observers can attach
    let model_path = args.model_dir.join(format!("{}.json", args.level));
    let (mut agent, loaded) = app.load_agent(&params, &model_path)?;

    print_section(&format!("Training '{}'", args.level));
    print_kv("Artifact", &model_path.display().to_string());
    print_kv(
        "Resumed from",
        &format!("{} episodes", format_number(agent.total_episodes())),
    );
    if !loaded {
        println!("  (no usable artifact found; starting from an empty table)");
    }

    let config = TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
    };
    let mut pipeline = TrainingPipeline::new(config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = pipeline.run(&mut agent)?;
    app.save_agent(&agent, &model_path)?;

    print_section("Training Complete");
    print_kv("Episodes", &format_number(result.total_episodes));
    print_kv(
        "X wins",
        &format!("{} ({:.1}%)", result.x_wins, result.x_win_rate * 100.0),
    );
    print_kv(
        "O wins",
        &format!("{} ({:.1}%)", result.o_wins, result.o_win_rate * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", result.draws, result.draw_rate * 100.0),
    );
    print_kv("Total episodes", &format_number(agent.total_episodes()));
    print_kv("Known states", &format_number(agent.known_states() as u64));

    if let Some(summary_path) = args.summary {
        result.save(&summary_path)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
