//! JSON configuration parsing for headless mode
//!
//! Parses JSON duel configurations, including the scripted defender's
//! behavior and an optional RON tuning file override.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::tuning::GameplayTuning;

/// Headless duel configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessDuelConfig {
    /// Path to a RON tuning file (default: built-in tuning)
    #[serde(default)]
    pub tuning_path: Option<String>,
    /// Scripted defender behavior
    #[serde(default)]
    pub defender: DefenderProfile,
    /// Custom output path for the duel log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Maximum duel duration in seconds (default: 120)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Random seed for deterministic duel reproduction
    /// If provided, the duel will use a seeded RNG for reproducible results
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// How the scripted defender responds to incoming attacks
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DefenderProfile {
    /// Probability of attempting a parry at all (default: 0.75)
    #[serde(default = "default_parry_chance")]
    pub parry_chance: f32,
    /// Of attempted parries, share held for the perfect window (default: 0.4)
    #[serde(default = "default_perfect_share")]
    pub perfect_share: f32,
    /// Probability an attempted parry is aimed the wrong way (default: 0.0)
    #[serde(default)]
    pub wrong_direction_chance: f32,
}

fn default_max_duration() -> f32 {
    120.0
}

fn default_parry_chance() -> f32 {
    0.75
}

fn default_perfect_share() -> f32 {
    0.4
}

impl Default for DefenderProfile {
    fn default() -> Self {
        Self {
            parry_chance: default_parry_chance(),
            perfect_share: default_perfect_share(),
            wrong_direction_chance: 0.0,
        }
    }
}

impl Default for HeadlessDuelConfig {
    fn default() -> Self {
        Self {
            tuning_path: None,
            defender: DefenderProfile::default(),
            output_path: None,
            max_duration_secs: default_max_duration(),
            random_seed: None,
        }
    }
}

impl HeadlessDuelConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessDuelConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_duration_secs <= 0.0 {
            return Err(format!(
                "max_duration_secs must be positive (got {})",
                self.max_duration_secs
            ));
        }
        for (name, value) in [
            ("parry_chance", self.defender.parry_chance),
            ("perfect_share", self.defender.perfect_share),
            (
                "wrong_direction_chance",
                self.defender.wrong_direction_chance,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be in [0, 1] (got {})", name, value));
            }
        }
        Ok(())
    }

    /// Resolve the gameplay tuning this duel should run with
    pub fn resolve_tuning(&self) -> Result<GameplayTuning, String> {
        match &self.tuning_path {
            Some(path) => load_tuning_from_ron(Path::new(path)),
            None => Ok(GameplayTuning::default()),
        }
    }
}

/// Load gameplay tuning from a RON file
pub fn load_tuning_from_ron(path: &Path) -> Result<GameplayTuning, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read tuning file {}: {}", path.display(), e))?;

    let tuning: GameplayTuning =
        ron::from_str(&contents).map_err(|e| format!("Failed to parse RON: {}", e))?;

    tuning.validate().map_err(|e| e.to_string())?;
    Ok(tuning)
}
