//! Orthogonal neighbor directions and their grid offsets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a cell on which a neighbor sits
///
/// The discriminant doubles as the first axis index into the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Neighbor at `[x, y + 1]`
    Top = 0,
    /// Neighbor at `[x, y - 1]`
    Bottom = 1,
    /// Neighbor at `[x - 1, y]`
    Left = 2,
    /// Neighbor at `[x + 1, y]`
    Right = 3,
}

/// All directions in transition table order
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Top,
    Direction::Bottom,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Index of this direction in the transition table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Coordinate delta `[dx, dy]` from a cell to its neighbor
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Top => [0, 1],
            Self::Bottom => [0, -1],
            Self::Left => [-1, 0],
            Self::Right => [1, 0],
        }
    }

    /// Lowercase name as used in scene files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
