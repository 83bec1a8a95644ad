//! Engine events
//!
//! The engine's entire boundary is event-shaped: a host submits
//! [`StartMatch`] and [`SubmitDirection`], and observes everything else.
//! Outbound events are delivered at most once per occurrence, in the order
//! the duel produces them.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::orchestrator::BoutOutcome;
use super::tuning::GameplayTuning;

/// Which combatant a life value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatSide {
    Player,
    Enemy,
}

impl CombatSide {
    pub fn name(&self) -> &'static str {
        match self {
            CombatSide::Player => "Player",
            CombatSide::Enemy => "Enemy",
        }
    }
}

/// Final result of a duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    PlayerWins,
    EnemyWins,
}

impl MatchResult {
    pub fn name(&self) -> &'static str {
        match self {
            MatchResult::PlayerWins => "Player wins",
            MatchResult::EnemyWins => "Enemy wins",
        }
    }
}

// ============================================================================
// Inbound events (host -> engine)
// ============================================================================

/// Begin a new match with the given tuning.
///
/// Sent once by the host. Ignored (with a warning) while a match is already
/// running; rejected (with an error log) if the tuning fails validation.
#[derive(Event, Clone, Debug)]
pub struct StartMatch {
    /// Gameplay tuning for the whole match; immutable once accepted
    pub tuning: GameplayTuning,
}

/// A directional gesture recognized by the host's input layer.
///
/// Applied against whatever parry window is currently open; discarded
/// silently when no window is open or the attack is already resolved.
#[derive(Event, Clone, Copy, Debug)]
pub struct SubmitDirection {
    pub direction: Direction,
}

// ============================================================================
// Outbound events (engine -> host)
// ============================================================================

/// One step of the pre-combat countdown (5, 4, 3, 2, 1).
#[derive(Event, Clone, Copy, Debug)]
pub struct CountdownTick {
    pub seconds_remaining: u8,
}

/// The countdown finished ("Fight!") and the combat loop begins.
#[derive(Event, Clone, Copy, Debug)]
pub struct MatchStarted;

/// An attack began; its parry window is open for the attack's whole
/// duration (wind-up plus wind-down).
#[derive(Event, Clone, Copy, Debug)]
pub struct ParryWindowOpened {
    pub direction: Direction,
}

/// The attack entered its wind-down phase. A parry resolved from this
/// moment until the window closes is a perfect parry.
#[derive(Event, Clone, Copy, Debug)]
pub struct WindDownStarted;

/// The attack's parry window closed. If no successful parry was recorded
/// by this point, this is the moment the miss is scored.
#[derive(Event, Clone, Copy, Debug)]
pub struct ParryWindowClosed {
    pub direction: Direction,
}

/// The attack finished entirely (always after its window closed).
#[derive(Event, Clone, Copy, Debug)]
pub struct AttackEnded {
    pub direction: Direction,
}

/// The player parried the current attack.
#[derive(Event, Clone, Copy, Debug)]
pub struct ParrySucceeded {
    /// True when the parry landed during the wind-down sub-window
    pub perfect: bool,
}

/// The current attack's window closed without a successful parry.
#[derive(Event, Clone, Copy, Debug)]
pub struct ParryMissed;

/// A bout finished (or was truncated) and was classified.
#[derive(Event, Clone, Copy, Debug)]
pub struct ComboResolved {
    pub outcome: BoutOutcome,
}

/// One combatant's life total changed.
#[derive(Event, Clone, Copy, Debug)]
pub struct LifeChanged {
    pub side: CombatSide,
    pub value: f32,
}

/// The consecutive perfect-parry counter changed.
#[derive(Event, Clone, Copy, Debug)]
pub struct PerfectStreakChanged {
    pub count: u32,
}

/// The match reached Resolution. Emitted exactly once per match.
#[derive(Event, Clone, Copy, Debug)]
pub struct MatchEnded {
    pub result: MatchResult,
}
