//! qoxo CLI - Self-play Q-learning for tic-tac-toe
//!
//! This CLI provides a unified interface for:
//! - Training difficulty levels via self-play
//! - Requesting move inference for a board position
//! - Inspecting trained tables

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qoxo")]
#[command(version, about = "Self-play Q-learning for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a level via self-play
    Train(qoxo::cli::commands::train::TrainArgs),

    /// Suggest a move for a board position
    Suggest(qoxo::cli::commands::suggest::SuggestArgs),

    /// Show episode count and table size for a level
    Status(qoxo::cli::commands::status::StatusArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qoxo::cli::commands::train::execute(args),
        Commands::Suggest(args) => qoxo::cli::commands::suggest::execute(args),
        Commands::Status(args) => qoxo::cli::commands::status::execute(args),
    }
}
