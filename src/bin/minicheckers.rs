//! minicheckers CLI - play 4×4 checkers against a Q-learning agent
//!
//! This CLI provides:
//! - Interactive games against the agent, which keeps learning across games
//! - Inspection of the learned Q-table
//! - Export of the Q-table for analysis

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "minicheckers")]
#[command(version, about = "4x4 checkers against a learning agent", long_about = None)]
struct Cli {
    /// Log agent decisions and value updates
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the agent in the terminal
    Play(minicheckers::cli::commands::play::PlayArgs),

    /// Summarize a saved Q-table
    Inspect(minicheckers::cli::commands::inspect::InspectArgs),

    /// Export a saved Q-table as CSV or JSON
    Export(minicheckers::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Play(args) => minicheckers::cli::commands::play::execute(args),
        Commands::Inspect(args) => minicheckers::cli::commands::inspect::execute(args),
        Commands::Export(args) => minicheckers::cli::commands::export::execute(args),
    }
}
