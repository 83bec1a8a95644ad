//! Strike and parry directions
//!
//! Attacks arrive from one of four cardinal directions; a parry succeeds
//! only when the defender inputs the opposite direction while the attack's
//! window is open.

use serde::{Deserialize, Serialize};

/// A directional gesture: either a cardinal direction or no direction at all.
///
/// `Neutral` exists because input devices report it (a released stick, a
/// centered swipe), but it has no opposite and can never parry anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Neutral,
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    /// The four directions an attack can come from. `Neutral` is never
    /// generated as an attack direction.
    pub const ATTACKS: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// The direction that parries this one. Up/Down and Left/Right are
    /// mutual opposites; `Neutral` has none.
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Direction::Neutral => None,
            Direction::Up => Some(Direction::Down),
            Direction::Down => Some(Direction::Up),
            Direction::Left => Some(Direction::Right),
            Direction::Right => Some(Direction::Left),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Neutral => "Neutral",
            Direction::Up => "Up",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Down => "Down",
        }
    }
}
