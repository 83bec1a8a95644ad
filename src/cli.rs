//! Command-line interface for ParrySim
//!
//! The binary only runs headless duels; interactive frontends embed the
//! engine through [`crate::combat::CombatPlugin`] instead.

use clap::Parser;
use std::path::PathBuf;

/// Reflex parry duel simulator
#[derive(Parser, Debug)]
#[command(name = "parrysim")]
#[command(about = "Reflex parry duel simulator")]
#[command(version)]
pub struct Args {
    /// Run a headless duel from the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Path to a RON tuning file (overrides the config's tuning_path)
    #[arg(long, value_name = "TUNING_FILE")]
    pub tuning: Option<PathBuf>,

    /// Output path for the duel log (overrides the config's output_path)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Random seed for deterministic duel reproduction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum duel duration in seconds (overrides the config)
    #[arg(long)]
    pub max_duration: Option<f32>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
