//! Suggest command - Move inference for a board position

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::{AgentParams, App, LevelsConfig, LevelService},
    tictactoe::{Board, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Suggest a move for a board position")]
pub struct SuggestArgs {
    /// Board string, row by row ('X', 'O', '.' or '_' for empty),
    /// e.g. "XX...OO.."
    pub board: String,

    /// Side requesting a move (`x` or `o`)
    #[arg(long, short = 'p', default_value = "x")]
    pub player: String,

    /// Level whose table to consult
    #[arg(long, short = 'l', default_value = "default")]
    pub level: String,

    /// Directory holding level artifacts
    #[arg(long, default_value = "models")]
    pub model_dir: PathBuf,

    /// Random seed (affects tie-breaking and unseen-state fallback)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: SuggestArgs) -> Result<()> {
    let board = Board::from_string(&args.board)?;
    let player = Player::parse(&args.player)?;

    let mut params = AgentParams::new();
    if let Some(seed) = args.seed {
        params = params.with_seed(seed);
    }

    let levels = LevelsConfig::from_dir(&args.model_dir, &[args.level.as_str()]);
    let service = LevelService::new(App::new(), levels, params, &args.level)?;

    let position = service.suggest_move(&board, player)?;
    let after = board.apply_move(position, player)?;

    println!("Move for {player}: position {position}");
    println!("\n{after}");

    Ok(())
}
