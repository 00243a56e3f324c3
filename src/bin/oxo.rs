//! OXO CLI - noughts-and-crosses with a tiered, adaptive automated opponent
//!
//! This CLI provides a unified interface for:
//! - Playing interactive games at three difficulty tiers
//! - Running headless simulations against scripted opponents
//! - Inspecting what the opponent model has learned

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Noughts-and-crosses with an adaptive opponent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the automated opponent (or a second human)
    Play(oxo::cli::commands::play::PlayArgs),

    /// Run headless games against a scripted opponent
    Simulate(oxo::cli::commands::simulate::SimulateArgs),

    /// Show opponent model statistics
    Stats(oxo::cli::commands::stats::StatsArgs),
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
        Commands::Simulate(args) => oxo::cli::commands::simulate::execute(args),
        Commands::Stats(args) => oxo::cli::commands::stats::execute(args),
    }
}
