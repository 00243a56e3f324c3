//! Stats command - report what the opponent model has learned

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::JsonModelRepository,
    cli::output,
    model::OpponentModel,
    ports::ModelRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Show opponent model statistics")]
pub struct StatsArgs {
    /// Path of the persisted opponent model
    #[arg(long, default_value = "oxo-model.json")]
    pub model: PathBuf,
}

pub fn execute(args: StatsArgs) -> Result<()> {
    let repository = JsonModelRepository::new();
    let model = match repository.load(&args.model) {
        Ok(Some(model)) => model,
        Ok(None) => {
            println!("No model stored at {} yet.", args.model.display());
            return Ok(());
        }
        Err(e) => {
            println!("Could not read {}: {e}", args.model.display());
            return Ok(());
        }
    };

    print_report(&model);
    Ok(())
}

fn print_report(model: &OpponentModel) {
    output::print_section("Opponent model");
    output::print_kv("Games learned", &model.games_learned.to_string());
    output::print_kv("Won sequences", &model.winning_sequences.len().to_string());
    output::print_kv("Lost sequences", &model.losing_sequences.len().to_string());
    output::print_kv("Stored patterns", &model.player_patterns.len().to_string());
    output::print_kv("Opening style", &model.classify().to_string());

    println!("\nOpening move counts:");
    for row in 0..3 {
        let base = row * 3;
        println!(
            "  {:>4} {:>4} {:>4}",
            model.opening_counts[base],
            model.opening_counts[base + 1],
            model.opening_counts[base + 2]
        );
    }
}
