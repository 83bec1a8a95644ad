//! Match controller
//!
//! The top-level state machine: Idle -> Preparation (countdown) ->
//! Combat (repeated bouts) -> Resolution (terminal). Owns both life
//! counters, the perfect streak and the end-of-match tie-break.

use bevy::prelude::*;
use serde::Serialize;

use super::events::{
    ComboResolved, CountdownTick, LifeChanged, MatchEnded, MatchResult, MatchStarted,
    ParryMissed, ParrySucceeded, StartMatch,
};
use super::log::CombatLog;
use super::orchestrator::BoutState;
use super::tuning::GameplayTuning;

/// Length of the pre-combat countdown: 5, 4, 3, 2, 1, then "Fight".
pub const COUNTDOWN_SECONDS: u8 = 5;

/// Phases of a match. `Resolution` is terminal for the match; a host may
/// start a fresh match from either `Idle` or `Resolution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// No match running
    #[default]
    Idle,
    /// Countdown playing; no attacks yet
    Preparation,
    /// Bout loop active
    Combat,
    /// Match decided; `MatchEnded` has been emitted
    Resolution,
}

/// The whole mutable state of one match.
///
/// Life counters are mutated only by the engine systems and clamped at
/// zero; hosts observe them through `LifeChanged` events.
#[derive(Resource, Debug)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub tuning: GameplayTuning,
    pub player_life: f32,
    pub enemy_life: f32,
    /// Consecutive perfect parries; resets on any non-perfect parry or miss
    pub perfect_streak: u32,
    /// Highest streak reached this match (for the end-of-match report)
    pub best_streak: u32,
    pub result: Option<MatchResult>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            phase: MatchPhase::Idle,
            tuning: GameplayTuning::default(),
            player_life: 0.0,
            enemy_life: 0.0,
            perfect_streak: 0,
            best_streak: 0,
            result: None,
        }
    }
}

/// Pre-combat countdown timer.
#[derive(Resource, Debug, Default)]
pub struct MatchCountdown {
    pub remaining: f32,
    /// The next announcement boundary (counts down 5..1)
    pub next_step: u8,
}

/// Aggregate counters for the end-of-match report.
#[derive(Resource, Debug, Default, Clone, Copy, Serialize)]
pub struct MatchStats {
    pub attacks: u32,
    pub parries: u32,
    pub perfect_parries: u32,
    pub misses: u32,
    pub bouts: u32,
}

/// Accept `StartMatch` requests from the host.
///
/// Rejected tunings are logged and skipped; a request while a match is in
/// progress is ignored. Both life totals are announced immediately so the
/// host can seed its presentation.
pub fn start_match(
    mut start_events: EventReader<StartMatch>,
    mut match_state: ResMut<MatchState>,
    mut countdown: ResMut<MatchCountdown>,
    mut bout: ResMut<BoutState>,
    mut stats: ResMut<MatchStats>,
    mut log: ResMut<CombatLog>,
    mut countdown_events: EventWriter<CountdownTick>,
    mut life_events: EventWriter<LifeChanged>,
) {
    for event in start_events.read() {
        if !matches!(
            match_state.phase,
            MatchPhase::Idle | MatchPhase::Resolution
        ) {
            warn!("StartMatch ignored: a match is already in progress");
            continue;
        }
        if let Err(err) = event.tuning.validate() {
            error!("StartMatch rejected: {}", err);
            continue;
        }

        *match_state = MatchState {
            phase: MatchPhase::Preparation,
            tuning: event.tuning.clone(),
            player_life: event.tuning.player_start_life,
            enemy_life: event.tuning.enemy_start_life,
            perfect_streak: 0,
            best_streak: 0,
            result: None,
        };
        *countdown = MatchCountdown {
            remaining: COUNTDOWN_SECONDS as f32,
            next_step: COUNTDOWN_SECONDS,
        };
        *bout = BoutState::default();
        *stats = MatchStats::default();
        // A rematch from Resolution must not inherit the previous
        // match's entries or its elapsed clock
        log.clear();

        life_events.send(LifeChanged {
            side: super::events::CombatSide::Player,
            value: match_state.player_life,
        });
        life_events.send(LifeChanged {
            side: super::events::CombatSide::Enemy,
            value: match_state.enemy_life,
        });
        countdown_events.send(CountdownTick {
            seconds_remaining: COUNTDOWN_SECONDS,
        });
        info!(
            "Match starting: player {:.1} life vs enemy {:.1} life",
            match_state.player_life, match_state.enemy_life
        );
    }
}

/// Tick the Preparation countdown and enter Combat when it finishes.
pub fn update_countdown(
    time: Res<Time>,
    mut match_state: ResMut<MatchState>,
    mut countdown: ResMut<MatchCountdown>,
    mut countdown_events: EventWriter<CountdownTick>,
    mut started_events: EventWriter<MatchStarted>,
) {
    if match_state.phase != MatchPhase::Preparation {
        return;
    }

    countdown.remaining -= time.delta_secs();
    while countdown.next_step > 1 && countdown.remaining <= (countdown.next_step - 1) as f32 {
        countdown.next_step -= 1;
        countdown_events.send(CountdownTick {
            seconds_remaining: countdown.next_step,
        });
    }

    if countdown.remaining <= 0.0 {
        match_state.phase = MatchPhase::Combat;
        started_events.send(MatchStarted);
        info!("Fight! Combat begins");
    }
}

/// Detect end-of-match and emit `MatchEnded` exactly once.
///
/// Tie-break: enemy-life-zero is checked first and is authoritative. A
/// single parry can zero the enemy in the same update in which the player
/// is still alive, and if both totals could be zero in one evaluation
/// step the player still wins.
pub fn check_match_end(
    mut match_state: ResMut<MatchState>,
    mut ended_events: EventWriter<MatchEnded>,
) {
    if match_state.phase != MatchPhase::Combat {
        return;
    }
    if match_state.player_life > 0.0 && match_state.enemy_life > 0.0 {
        return;
    }

    let result = if match_state.enemy_life <= 0.0 {
        MatchResult::PlayerWins
    } else {
        MatchResult::EnemyWins
    };
    match_state.result = Some(result);
    match_state.phase = MatchPhase::Resolution;
    ended_events.send(MatchEnded { result });
    info!("Match ended! {}", result.name());
}

/// Aggregate per-match counters from resolution events.
pub fn update_match_stats(
    mut parry_events: EventReader<ParrySucceeded>,
    mut miss_events: EventReader<ParryMissed>,
    mut combo_events: EventReader<ComboResolved>,
    mut stats: ResMut<MatchStats>,
) {
    for event in parry_events.read() {
        stats.attacks += 1;
        stats.parries += 1;
        if event.perfect {
            stats.perfect_parries += 1;
        }
    }
    for _ in miss_events.read() {
        stats.attacks += 1;
        stats.misses += 1;
    }
    for _ in combo_events.read() {
        stats.bouts += 1;
    }
}
