//! Life-ratio difficulty scaling
//!
//! Pure interpolation from the enemy's remaining life to the pacing of the
//! next bout. As enemy life drops the pacing slides toward the empty-life
//! preset, which is typically authored faster and denser for a desperation
//! feel.

use super::tuning::GameplayTuning;

/// Pacing parameters for one bout, derived from tuning and enemy life.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComboPacing {
    pub attack_count: u32,
    pub interval_between_attacks: f32,
    pub wind_up_duration: f32,
    pub wind_down_duration: f32,
}

/// A bout always contains at least one attack; a zero-attack bout could
/// never change either life total and would loop the match forever.
pub const MIN_ATTACKS_PER_BOUT: u32 = 1;

pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Linear interpolation that is exact at both endpoints: `t = 0` returns
/// `a` and `t = 1` returns `b` bit-for-bit, so a full-life or empty-life
/// bout uses exactly the authored preset values.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Compute the pacing for the next bout from the enemy's current life.
///
/// `ratio = clamp01(enemy_life / enemy_start_life)`; every parameter is
/// lerped from the empty-life preset (ratio 0) to the full-life preset
/// (ratio 1). The attack count is truncated, not rounded - a lerp result
/// of 2.9 yields 2 attacks.
pub fn scale_pacing(tuning: &GameplayTuning, enemy_life: f32) -> ComboPacing {
    let ratio = clamp01(enemy_life / tuning.enemy_start_life);
    let empty = &tuning.empty_life_combo;
    let full = &tuning.full_life_combo;

    let attack_count = lerp(empty.attack_count, full.attack_count, ratio).trunc() as u32;

    ComboPacing {
        attack_count: attack_count.max(MIN_ATTACKS_PER_BOUT),
        interval_between_attacks: lerp(
            empty.interval_between_attacks,
            full.interval_between_attacks,
            ratio,
        ),
        wind_up_duration: lerp(empty.wind_up_duration, full.wind_up_duration, ratio),
        wind_down_duration: lerp(empty.wind_down_duration, full.wind_down_duration, ratio),
    }
}
