//! ParrySim - Reflex Parry Duel Simulator
//!
//! Headless runner for the reflex parry duel engine. Loads an optional
//! JSON config, applies CLI overrides, runs one duel and prints the
//! report as JSON.

use std::process;

use parrysim::cli;
use parrysim::headless::{run_headless_duel, HeadlessDuelConfig};

fn main() {
    let args = cli::parse_args();

    let mut config = match &args.headless {
        Some(path) => match HeadlessDuelConfig::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config: {}", err);
                process::exit(1);
            }
        },
        None => HeadlessDuelConfig::default(),
    };

    if let Some(tuning) = &args.tuning {
        config.tuning_path = Some(tuning.display().to_string());
    }
    if let Some(output) = &args.output {
        config.output_path = Some(output.display().to_string());
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }

    let report = match run_headless_duel(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Duel failed: {}", err);
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Failed to serialize report: {}", err);
            process::exit(1);
        }
    }
}
