//! CLI subcommand implementations

pub mod play;
pub mod simulate;
pub mod stats;
