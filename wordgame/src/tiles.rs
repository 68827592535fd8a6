use serde::{Deserialize, Serialize};

/// Stands for a blank tile wherever tiles are requested by letter,
/// e.g. in an exchange.
pub const BLANK: char = '?';

/// Identifies one physical tile for the duration of a match.
///
/// Ids are handed out by [`TilePool::fill()`](crate::TilePool::fill) and
/// never reused, so a tile can be tracked across rack, pool and board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u16);

/// What is printed on a [`Tile`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TileFace {
    Letter { letter: char, points: u32 },
    /// A blank gets its letter when it is placed on the board, and loses it
    /// again when it goes back to a rack.
    Blank { assigned: Option<char> },
}

/// A letter tile or a blank tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub face: TileFace,
}

impl Tile {
    pub fn letter(id: TileId, letter: char, points: u32) -> Self {
        Self {
            id,
            face: TileFace::Letter {
                letter: letter.to_ascii_uppercase(),
                points,
            },
        }
    }

    pub fn blank(id: TileId) -> Self {
        Self {
            id,
            face: TileFace::Blank { assigned: None },
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.face, TileFace::Blank { .. })
    }

    /// The letter this tile shows. `None` for a blank that has not been placed.
    pub fn char(&self) -> Option<char> {
        match self.face {
            TileFace::Letter { letter, .. } => Some(letter),
            TileFace::Blank { assigned } => assigned,
        }
    }

    /// Blanks are always worth zero.
    pub fn points(&self) -> u32 {
        match self.face {
            TileFace::Letter { points, .. } => points,
            TileFace::Blank { .. } => 0,
        }
    }

    /// Whether this tile answers a request for `wanted`, which is either
    /// a letter or [`BLANK`]. Blanks only answer [`BLANK`] here; the fallback
    /// to a blank is decided by the [`Rack`](crate::Rack).
    pub fn matches(&self, wanted: char) -> bool {
        match self.face {
            TileFace::Letter { letter, .. } => letter.eq_ignore_ascii_case(&wanted),
            TileFace::Blank { .. } => wanted == BLANK,
        }
    }

    /// Gives a blank its letter. Letter tiles are returned unchanged.
    #[must_use]
    pub fn with_assigned(self, letter: char) -> Self {
        match self.face {
            TileFace::Blank { .. } => Self {
                id: self.id,
                face: TileFace::Blank {
                    assigned: Some(letter.to_ascii_uppercase()),
                },
            },
            TileFace::Letter { .. } => self,
        }
    }

    /// Takes the letter away from a blank.
    #[must_use]
    pub fn cleared(self) -> Self {
        match self.face {
            TileFace::Blank { .. } => Self::blank(self.id),
            TileFace::Letter { .. } => self,
        }
    }
}

impl std::fmt::Display for Tile {
    /// Letter tiles print as their uppercase letter, placed blanks as their
    /// lowercase letter and unplaced blanks as `?`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.face {
            TileFace::Letter { letter, .. } => write!(f, "{}", letter),
            TileFace::Blank {
                assigned: Some(letter),
            } => write!(f, "{}", letter.to_ascii_lowercase()),
            TileFace::Blank { assigned: None } => write!(f, "{}", BLANK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_letter_is_assigned_and_cleared() {
        let blank = Tile::blank(TileId(3));
        assert_eq!(blank.char(), None);
        assert_eq!(blank.to_string(), "?");

        let placed = blank.with_assigned('e');
        assert_eq!(placed.char(), Some('E'));
        assert_eq!(placed.points(), 0);
        assert_eq!(placed.to_string(), "e");

        let back = placed.cleared();
        assert_eq!(back, blank);
    }

    #[test]
    fn letter_tiles_ignore_assignment() {
        let tile = Tile::letter(TileId(0), 'q', 10);
        assert_eq!(tile.with_assigned('X'), tile);
        assert_eq!(tile.cleared(), tile);
        assert!(tile.matches('Q'));
        assert!(!tile.matches(BLANK));
        assert_eq!(tile.to_string(), "Q");
    }
}
