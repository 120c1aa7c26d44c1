//! Cardinal directions and their coordinate deltas
//!
//! Movement is strictly orthogonal. Every place that enumerates neighbours
//! uses [`Direction::SCAN_ORDER`], so junction branch lists and therefore
//! heuristic tie-breaks are deterministic.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// One of the four cardinal directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rejected input to [`Direction::from_delta`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DirectionError {
    #[error("zero delta has no direction")]
    Zero,
    #[error("diagonal delta ({dx}, {dy}) has no cardinal direction")]
    Diagonal { dx: isize, dy: isize },
}

impl Direction {
    /// Neighbour scan order: dx ascending, then dy ascending.
    pub const SCAN_ORDER: [Direction; 4] =
        [Direction::Left, Direction::Up, Direction::Down, Direction::Right];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `(dx, dy)` of one step; y grows downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction selected by the sign of the single non-zero component.
    ///
    /// Magnitude is ignored, so `(0, 7)` is `Down`. Exactly one component
    /// must be non-zero.
    pub fn from_delta(dx: isize, dy: isize) -> Result<Self, DirectionError> {
        match (dx.signum(), dy.signum()) {
            (0, 0) => Err(DirectionError::Zero),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            _ => Err(DirectionError::Diagonal { dx, dy }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UP" | "U" => Ok(Direction::Up),
            "DOWN" | "D" => Ok(Direction::Down),
            "LEFT" | "L" => Ok(Direction::Left),
            "RIGHT" | "R" => Ok(Direction::Right),
            _ => Err(format!(
                "Invalid direction: '{}'. Must be one of UP, DOWN, LEFT, RIGHT",
                s
            )),
        }
    }
}
