use serde::{Deserialize, Serialize};

/// A playable cell position, 1-based. Column `x` is written as a letter
/// (`A` is 1), row `y` as a number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Coordinate {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// `None` if the column is beyond `Z`.
    pub fn column_letter(&self) -> Option<char> {
        if (1..=26).contains(&self.x) {
            Some((b'A' + self.x - 1) as char)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column_letter() {
            Some(column) => write!(f, "{}{}", column, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

impl Direction {
    pub fn other(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// The `(dx, dy)` of one step forward.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
        }
    }
}
