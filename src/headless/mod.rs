//! Headless mode for automated testing
//!
//! Runs duels without graphics against a scripted defender, suitable for
//! automated testing, tuning sweeps, and determinism checks.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless duel
//! cargo run --release -- --headless duel_config.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "defender": { "parry_chance": 0.9, "perfect_share": 0.5 },
//!   "max_duration_secs": 60,
//!   "random_seed": 42
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{load_tuning_from_ron, DefenderProfile, HeadlessDuelConfig};
pub use runner::{run_headless_duel, AutoDefender, DuelReport};
