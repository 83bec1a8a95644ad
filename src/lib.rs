//! ParrySim - Reflex Parry Duel Simulator
//!
//! A two-combatant reflex duel engine: the enemy issues timed directional
//! strikes, the player must answer each one with the opposite cardinal
//! direction inside its parry window, and the outcomes drive two life
//! counters until one side reaches zero.
//!
//! This library exposes the pure combat engine. Rendering, audio and input
//! capture are the host's concern: the host submits [`combat::events::SubmitDirection`]
//! events and observes the engine's outbound events.

pub mod cli;
pub mod combat;
pub mod headless;

// Re-export commonly used types
pub use combat::direction::Direction;
pub use combat::log::{CombatLog, CombatLogEventType};
pub use combat::tuning::{ComboPreset, GameplayTuning};
pub use combat::{CombatPlugin, GameRng};
pub use headless::{run_headless_duel, DuelReport, HeadlessDuelConfig};
