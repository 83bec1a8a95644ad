//! Per-attack timing sequencer
//!
//! One [`AttackTimeline`] drives a single attack through
//! wind-up -> wind-down -> closed. It is a pure state machine: the
//! orchestrator ticks it with elapsed time and converts the returned
//! signals into engine events, so the sequencing logic stays directly
//! testable without an `App`.
//!
//! The parry window spans the *entire* attack (wind-up plus wind-down),
//! not just the wind-down; the wind-down transition only demarcates the
//! perfect-parry sub-window.

use smallvec::SmallVec;
use thiserror::Error;

use super::direction::Direction;

/// Phase transitions produced by a tick, in the order they occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineSignal {
    /// The attack entered wind-down; the perfect sub-window begins
    WindDownStarted,
    /// The attack's window closed; the attack is over
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimelinePhase {
    WindUp { remaining: f32, wind_down: f32 },
    WindDown { remaining: f32 },
    Closed,
}

/// Rejected timeline starts. Timelines never run with non-positive phase
/// durations; the caller logs the error and skips the attack.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("attack {phase} duration must be positive (got {value})")]
    NonPositiveDuration { phase: &'static str, value: f32 },
}

/// The lifecycle of one attack.
///
/// `resolved` tracks whether a successful parry already landed: a resolved
/// attack no longer accepts input even though its timeline keeps playing
/// out to `Closed` for presentation purposes.
#[derive(Debug, Clone)]
pub struct AttackTimeline {
    pub direction: Direction,
    phase: TimelinePhase,
    resolved: bool,
}

impl AttackTimeline {
    /// Start an attack. Emission of `ParryWindowOpened` is the caller's
    /// job, immediately on success.
    pub fn start(
        direction: Direction,
        wind_up: f32,
        wind_down: f32,
    ) -> Result<Self, TimelineError> {
        if wind_up <= 0.0 {
            return Err(TimelineError::NonPositiveDuration {
                phase: "wind-up",
                value: wind_up,
            });
        }
        if wind_down <= 0.0 {
            return Err(TimelineError::NonPositiveDuration {
                phase: "wind-down",
                value: wind_down,
            });
        }
        Ok(Self {
            direction,
            phase: TimelinePhase::WindUp {
                remaining: wind_up,
                wind_down,
            },
            resolved: false,
        })
    }

    /// Advance the attack by `dt` seconds.
    ///
    /// Leftover time rolls across a phase boundary, so a single large tick
    /// can produce both `WindDownStarted` and `Closed` - always in that
    /// order, and each at most once per attack.
    pub fn tick(&mut self, dt: f32) -> SmallVec<[TimelineSignal; 2]> {
        let mut signals = SmallVec::new();
        let mut dt = dt;

        if let TimelinePhase::WindUp {
            remaining,
            wind_down,
        } = self.phase
        {
            if dt < remaining {
                self.phase = TimelinePhase::WindUp {
                    remaining: remaining - dt,
                    wind_down,
                };
                return signals;
            }
            dt -= remaining;
            self.phase = TimelinePhase::WindDown {
                remaining: wind_down,
            };
            signals.push(TimelineSignal::WindDownStarted);
        }

        if let TimelinePhase::WindDown { remaining } = self.phase {
            if dt < remaining {
                self.phase = TimelinePhase::WindDown {
                    remaining: remaining - dt,
                };
                return signals;
            }
            self.phase = TimelinePhase::Closed;
            signals.push(TimelineSignal::Closed);
        }

        signals
    }

    /// Whether the window still accepts a resolving input.
    pub fn is_open(&self) -> bool {
        !self.resolved && self.phase != TimelinePhase::Closed
    }

    /// Whether the attack is currently in its wind-down sub-window.
    pub fn in_wind_down(&self) -> bool {
        matches!(self.phase, TimelinePhase::WindDown { .. })
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Record a successful parry, closing the window for further input.
    /// The timeline itself keeps playing out to `Closed`.
    pub fn resolve(&mut self) {
        self.resolved = true;
    }
}
