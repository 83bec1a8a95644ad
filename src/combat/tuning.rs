//! Gameplay tuning
//!
//! All balance values for a duel live here, loaded once before the match
//! starts and never mutated afterwards. Like ability balance data in a
//! data-driven game, tuning can come from a RON file (see
//! `assets/config/tuning.ron`) so balance changes don't require
//! recompilation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Combo pacing values authored for one end of the enemy's life range.
///
/// The engine holds two presets - one for full enemy life, one for empty -
/// and linearly interpolates between them as the enemy's life drops.
/// `attack_count` is authored as a float because it participates in that
/// interpolation; the result is truncated to an integer per bout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboPreset {
    /// Number of attacks per bout (interpolated, then truncated)
    pub attack_count: f32,
    /// Idle seconds between consecutive attacks in a bout
    pub interval_between_attacks: f32,
    /// Seconds of wind-up (anticipation) per attack
    pub wind_up_duration: f32,
    /// Seconds of wind-down (strike/resolution) per attack; the perfect
    /// parry sub-window spans exactly this phase
    pub wind_down_duration: f32,
}

/// Immutable per-match configuration.
///
/// Enemy damage values are configurable floats; the player's per-miss life
/// loss is deliberately a fixed 1.0 and is not part of the tuning (the two
/// combatants' damage models are asymmetric by design).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayTuning {
    pub player_start_life: f32,
    pub enemy_start_life: f32,
    /// Pacing when the enemy is at full life
    pub full_life_combo: ComboPreset,
    /// Pacing when the enemy's life is empty
    pub empty_life_combo: ComboPreset,
    /// Seconds of rest between bouts
    pub pause_between_combos: f32,
    /// Enemy damage for a normal parry
    pub damage_on_parry: f32,
    /// Multiplier applied to `damage_on_parry` for a perfect parry
    pub damage_perfect_ratio: f32,
    /// Bonus enemy damage when every attack in a bout was parried
    pub damage_on_combo_parry: f32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            player_start_life: 5.0,
            enemy_start_life: 10.0,
            full_life_combo: ComboPreset {
                attack_count: 2.0,
                interval_between_attacks: 0.35,
                wind_up_duration: 0.9,
                wind_down_duration: 0.45,
            },
            empty_life_combo: ComboPreset {
                attack_count: 5.0,
                interval_between_attacks: 0.2,
                wind_up_duration: 0.5,
                wind_down_duration: 0.3,
            },
            pause_between_combos: 1.2,
            damage_on_parry: 0.5,
            damage_perfect_ratio: 2.0,
            damage_on_combo_parry: 1.0,
        }
    }
}

/// Reasons a tuning is rejected at match start
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be at least 1 (got {value})")]
    AttackCountTooLow { field: &'static str, value: f32 },
}

impl GameplayTuning {
    /// Validate the tuning before a match starts.
    ///
    /// A rejected tuning never starts a match; it is logged by the caller
    /// and the `StartMatch` request is skipped. Timelines separately refuse
    /// non-positive phase durations as a unit-level guard, but a tuning that
    /// passes here can never produce one (interpolating two positive
    /// durations stays positive).
    pub fn validate(&self) -> Result<(), TuningError> {
        require_positive("player_start_life", self.player_start_life)?;
        require_positive("enemy_start_life", self.enemy_start_life)?;
        validate_preset("full_life_combo", &self.full_life_combo)?;
        validate_preset("empty_life_combo", &self.empty_life_combo)?;
        require_non_negative("pause_between_combos", self.pause_between_combos)?;
        require_non_negative("damage_on_parry", self.damage_on_parry)?;
        require_non_negative("damage_perfect_ratio", self.damage_perfect_ratio)?;
        require_non_negative("damage_on_combo_parry", self.damage_on_combo_parry)?;
        Ok(())
    }
}

fn validate_preset(name: &'static str, preset: &ComboPreset) -> Result<(), TuningError> {
    if preset.attack_count < 1.0 {
        return Err(TuningError::AttackCountTooLow {
            field: name,
            value: preset.attack_count,
        });
    }
    if preset.interval_between_attacks < 0.0 {
        return Err(TuningError::Negative {
            field: name,
            value: preset.interval_between_attacks,
        });
    }
    if preset.wind_up_duration <= 0.0 {
        return Err(TuningError::NonPositive {
            field: name,
            value: preset.wind_up_duration,
        });
    }
    if preset.wind_down_duration <= 0.0 {
        return Err(TuningError::NonPositive {
            field: name,
            value: preset.wind_down_duration,
        });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value <= 0.0 {
        return Err(TuningError::NonPositive { field, value });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value < 0.0 {
        return Err(TuningError::Negative { field, value });
    }
    Ok(())
}
