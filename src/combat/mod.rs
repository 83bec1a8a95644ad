//! Combat engine
//!
//! Implements the reflex parry duel:
//! - Match lifecycle (countdown, combat loop, resolution)
//! - Attack timelines with parry and perfect-parry windows
//! - Parry input resolution and life accounting
//! - Life-scaled bout pacing and random attack generation
//! - Combat logging
//!
//! The engine is headless by construction. It talks to the outside world
//! only through events: frontends send [`StartMatch`] and
//! [`SubmitDirection`], and react to the outbound events declared in
//! [`events`].

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod difficulty;
pub mod direction;
pub mod events;
pub mod log;
pub mod match_control;
pub mod orchestrator;
pub mod resolver;
pub mod timeline;
pub mod tuning;

use events::*;
use log::record_combat_log;
use match_control::{check_match_end, start_match, update_countdown, update_match_stats};
use orchestrator::advance_bout;
use resolver::resolve_parry_inputs;

/// Plugin wiring the full duel engine into an [`App`].
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Inbound events
            .add_event::<StartMatch>()
            .add_event::<SubmitDirection>()
            // Outbound events
            .add_event::<CountdownTick>()
            .add_event::<MatchStarted>()
            .add_event::<ParryWindowOpened>()
            .add_event::<WindDownStarted>()
            .add_event::<ParryWindowClosed>()
            .add_event::<AttackEnded>()
            .add_event::<ParrySucceeded>()
            .add_event::<ParryMissed>()
            .add_event::<ComboResolved>()
            .add_event::<LifeChanged>()
            .add_event::<PerfectStreakChanged>()
            .add_event::<MatchEnded>()
            // Resources
            .init_resource::<match_control::MatchState>()
            .init_resource::<match_control::MatchCountdown>()
            .init_resource::<match_control::MatchStats>()
            .init_resource::<orchestrator::BoutState>()
            .init_resource::<GameRng>()
            .init_resource::<log::CombatLog>()
            // Systems, in tick order: lifecycle first, then input
            // resolution, then bout advancement, then bookkeeping.
            .add_systems(
                Update,
                (
                    start_match,
                    update_countdown,
                    resolve_parry_inputs,
                    advance_bout,
                    check_match_end,
                    update_match_stats,
                    record_combat_log,
                )
                    .chain(),
            );
    }
}

/// Seeded random number generator for deterministic duels.
///
/// When a seed is provided (e.g., via headless config), the same seed will
/// always produce the same attack sequence. Without a seed, uses system
/// entropy.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Generate a random f32 in the given range
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random_f32() * (max - min)
    }

    /// Pick a uniformly random index below `len`
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
