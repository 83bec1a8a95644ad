//! Headless duel execution
//!
//! Runs duels without any graphical output, suitable for automated
//! testing and tuning sweeps. The app is stepped manually at a fixed
//! 60 Hz so seeded runs replay tick-for-tick.

use bevy::prelude::*;
use serde::Serialize;
use std::time::Duration;

use crate::combat::direction::Direction;
use crate::combat::events::{
    MatchResult, ParryWindowClosed, ParryWindowOpened, StartMatch, SubmitDirection,
    WindDownStarted,
};
use crate::combat::log::{CombatLog, DuelMetadata};
use crate::combat::match_control::{MatchPhase, MatchState, MatchStats};
use crate::combat::resolver::resolve_parry_inputs;
use crate::combat::{CombatPlugin, GameRng};

use super::config::{DefenderProfile, HeadlessDuelConfig};

/// Fixed step rate for headless simulation
pub const TICK_RATE_HZ: f64 = 60.0;

/// Result of a completed headless duel
///
/// This struct provides programmatic access to duel results for testing
/// and analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DuelReport {
    /// The winning side, or None if the duel timed out
    pub winner: Option<MatchResult>,
    /// Simulated time in seconds, countdown included
    pub duration_seconds: f32,
    /// Number of ticks executed
    pub ticks: u64,
    /// Aggregate counters gathered during the duel
    pub stats: MatchStats,
    pub final_player_life: f32,
    pub final_enemy_life: f32,
    /// Longest run of consecutive perfect parries
    pub best_streak: u32,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
    /// Where the combat log was written, if requested
    pub log_path: Option<String>,
}

/// Scripted stand-in for the player in headless duels.
///
/// Reacts to attack windows one tick after they are announced, which at
/// 60 Hz is well inside any sane wind-up.
#[derive(Resource, Debug)]
pub struct AutoDefender {
    pub profile: DefenderProfile,
    /// Input held back for the perfect window of the current attack
    pending: Option<Direction>,
}

impl AutoDefender {
    pub fn new(profile: DefenderProfile) -> Self {
        Self {
            profile,
            pending: None,
        }
    }
}

/// Decide and submit the defender's inputs for this tick.
///
/// A parry attempt rolled as "perfect" is held until the wind-down
/// announcement; everything else is submitted as soon as the window
/// opens, landing as a normal parry during wind-up.
pub fn auto_defender(
    mut defender: ResMut<AutoDefender>,
    mut rng: ResMut<GameRng>,
    mut opened_events: EventReader<ParryWindowOpened>,
    mut wind_down_events: EventReader<WindDownStarted>,
    mut closed_events: EventReader<ParryWindowClosed>,
    mut inputs: EventWriter<SubmitDirection>,
) {
    for event in opened_events.read() {
        defender.pending = None;
        if rng.random_f32() >= defender.profile.parry_chance {
            continue;
        }
        let Some(correct) = event.direction.opposite() else {
            continue;
        };
        // A wrong-direction attempt mirrors the attack itself, which can
        // never match and so becomes a miss when the window closes.
        let reply = if rng.random_f32() < defender.profile.wrong_direction_chance {
            event.direction
        } else {
            correct
        };
        if rng.random_f32() < defender.profile.perfect_share {
            defender.pending = Some(reply);
        } else {
            inputs.send(SubmitDirection { direction: reply });
        }
    }

    for _ in wind_down_events.read() {
        if let Some(direction) = defender.pending.take() {
            inputs.send(SubmitDirection { direction });
        }
    }

    for _ in closed_events.read() {
        defender.pending = None;
    }
}

/// Run a complete duel to resolution or timeout and report the outcome.
pub fn run_headless_duel(config: &HeadlessDuelConfig) -> Result<DuelReport, String> {
    config.validate()?;
    let tuning = config.resolve_tuning()?;

    info!(
        "Starting headless duel (max {:.0}s, parry chance {:.2})",
        config.max_duration_secs, config.defender.parry_chance
    );

    let mut app = App::new();
    app.add_plugins(bevy::log::LogPlugin::default());
    app.init_resource::<Time>();
    app.add_plugins(CombatPlugin);

    let rng = match config.random_seed {
        Some(seed) => {
            info!("Using deterministic RNG with seed: {}", seed);
            GameRng::from_seed(seed)
        }
        None => GameRng::from_entropy(),
    };
    app.insert_resource(rng);
    app.insert_resource(AutoDefender::new(config.defender));
    app.add_systems(Update, auto_defender.before(resolve_parry_inputs));

    app.world_mut().send_event(StartMatch { tuning });

    let step = Duration::from_secs_f64(1.0 / TICK_RATE_HZ);
    let max_ticks = (config.max_duration_secs as f64 * TICK_RATE_HZ).ceil() as u64;
    let mut ticks = 0u64;
    while ticks < max_ticks {
        app.world_mut().resource_mut::<Time>().advance_by(step);
        app.update();
        ticks += 1;
        if app.world().resource::<MatchState>().phase == MatchPhase::Resolution {
            break;
        }
    }

    let duration_seconds = ticks as f32 / TICK_RATE_HZ as f32;
    let (winner, final_player_life, final_enemy_life, best_streak) = {
        let state = app.world().resource::<MatchState>();
        (
            state.result,
            state.player_life,
            state.enemy_life,
            state.best_streak,
        )
    };
    let stats = *app.world().resource::<MatchStats>();

    match winner {
        Some(result) => info!("Duel over after {:.1}s: {}", duration_seconds, result.name()),
        None => info!("Duel timed out after {:.1}s", duration_seconds),
    }

    let mut log_path = None;
    if let Some(path) = &config.output_path {
        let mut log = app.world_mut().resource_mut::<CombatLog>();
        log.metadata = DuelMetadata {
            seed: config.random_seed,
            duration_seconds,
            winner: winner.map(|r| r.name().to_string()),
        };
        match log.save_to_file(path) {
            Ok(saved) => {
                info!("Combat log written to {}", saved);
                log_path = Some(saved);
            }
            Err(err) => error!("{}", err),
        }
    }

    Ok(DuelReport {
        winner,
        duration_seconds,
        ticks,
        stats,
        final_player_life,
        final_enemy_life,
        best_streak,
        random_seed: config.random_seed,
        log_path,
    })
}
