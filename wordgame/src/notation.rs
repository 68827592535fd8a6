//! The text form of actions.
//!
//! `H8 WORD` places WORD horizontally from column H, row 8, and `8H WORD`
//! places it vertically. Lower-case letters are played with blanks.
//! `-ABC` exchanges the tiles A, B and C (`?` for a blank), and a lone `-`
//! skips the turn.

use std::str::FromStr;

use crate::{Action, Coordinate, Direction, Placement, BLANK};

/// The error type for parsing an [`Action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotationError {
    Empty,
    InvalidCoordinate(String),
    MissingWord,
    InvalidWord(String),
    InvalidExchange(String),
}

impl std::error::Error for NotationError {}

impl std::fmt::Display for NotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotationError::Empty => write!(f, "No move given"),
            NotationError::InvalidCoordinate(s) => write!(
                f,
                "'{}' is not a coordinate, expected e.g. H8 (horizontal) or 8H (vertical)",
                s
            ),
            NotationError::MissingWord => write!(f, "The coordinate must be followed by a word"),
            NotationError::InvalidWord(s) => {
                write!(f, "'{}' is not a word, only letters are allowed", s)
            }
            NotationError::InvalidExchange(s) => write!(
                f,
                "'{}' is not an exchange, expected '-' followed by letters or '{}'",
                s, BLANK
            ),
        }
    }
}

/// Parses `H8` or `8H` into the start cell and the direction.
fn parse_coordinate(s: &str) -> Result<(Coordinate, Direction), NotationError> {
    let invalid = || NotationError::InvalidCoordinate(s.to_string());
    let bytes = s.as_bytes();
    if bytes.len() < 2 || !s.is_ascii() {
        return Err(invalid());
    }

    let (column, row, direction) = if bytes[0].is_ascii_alphabetic() {
        (bytes[0], &s[1..], Direction::Horizontal)
    } else if bytes[bytes.len() - 1].is_ascii_alphabetic() {
        (bytes[bytes.len() - 1], &s[..s.len() - 1], Direction::Vertical)
    } else {
        return Err(invalid());
    };

    if !row.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let y: u8 = row.parse().map_err(|_| invalid())?;
    let x = column.to_ascii_uppercase() - b'A' + 1;
    if y == 0 {
        return Err(invalid());
    }
    Ok((Coordinate::new(x, y), direction))
}

impl Placement {
    /// Creates a placement from a coordinate like `H8` or `8H` and a word.
    pub fn from_notation(coordinate: &str, word: &str) -> Result<Self, NotationError> {
        let (start, direction) = parse_coordinate(coordinate)?;
        if word.is_empty() {
            return Err(NotationError::MissingWord);
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(NotationError::InvalidWord(word.to_string()));
        }
        Ok(Placement::new(start, direction, word))
    }

    /// The coordinate part of the notation, which also encodes the direction.
    pub fn coordinate_notation(&self) -> String {
        let column = self.start.column_letter().unwrap_or('?');
        match self.direction {
            Direction::Horizontal => format!("{}{}", column, self.start.y),
            Direction::Vertical => format!("{}{}", self.start.y, column),
        }
    }
}

impl FromStr for Action {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NotationError::Empty);
        }

        if let Some(rest) = s.strip_prefix('-') {
            let letters: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
            if letters.is_empty() {
                return Ok(Action::SkipTurn);
            }
            if !letters
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == BLANK)
            {
                return Err(NotationError::InvalidExchange(s.to_string()));
            }
            return Ok(Action::Exchange {
                letters: letters.chars().map(|c| c.to_ascii_uppercase()).collect(),
            });
        }

        let mut parts = s.split_whitespace();
        let coordinate = parts.next().ok_or(NotationError::Empty)?;
        let word = parts.next().ok_or(NotationError::MissingWord)?;
        if let Some(extra) = parts.next() {
            return Err(NotationError::InvalidWord(extra.to_string()));
        }
        Ok(Action::PlaceWord(Placement::from_notation(coordinate, word)?))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlaceWord(placement) => write!(
                f,
                "{} {}",
                placement.coordinate_notation(),
                placement.marked_word()
            ),
            Action::Exchange { letters } => {
                let letters: String = letters.iter().collect();
                write!(f, "-{}", letters)
            }
            Action::SkipTurn => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_the_order() {
        let Action::PlaceWord(horizontal) = "H8 CAT".parse().unwrap() else {
            panic!("expected a placement");
        };
        assert_eq!(horizontal.start, Coordinate::new(8, 8));
        assert_eq!(horizontal.direction, Direction::Horizontal);

        let Action::PlaceWord(vertical) = "12b cAt".parse().unwrap() else {
            panic!("expected a placement");
        };
        assert_eq!(vertical.start, Coordinate::new(2, 12));
        assert_eq!(vertical.direction, Direction::Vertical);
        assert_eq!(vertical.word, "CAT");
        assert!(vertical.is_played_by_blank(0));
        assert!(!vertical.is_played_by_blank(1));
    }

    #[test]
    fn exchange_and_skip() {
        assert_eq!(
            "-ab?".parse::<Action>(),
            Ok(Action::Exchange {
                letters: vec!['A', 'B', BLANK]
            })
        );
        assert_eq!(
            " - QU ".parse::<Action>(),
            Ok(Action::Exchange {
                letters: vec!['Q', 'U']
            })
        );
        assert_eq!("-".parse::<Action>(), Ok(Action::SkipTurn));
        assert!(matches!(
            "-A1".parse::<Action>(),
            Err(NotationError::InvalidExchange(_))
        ));
    }

    #[test]
    fn invalid_notation() {
        assert_eq!("".parse::<Action>(), Err(NotationError::Empty));
        assert_eq!("H8".parse::<Action>(), Err(NotationError::MissingWord));
        assert!(matches!(
            "HH WORD".parse::<Action>(),
            Err(NotationError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            "88 WORD".parse::<Action>(),
            Err(NotationError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            "H0 WORD".parse::<Action>(),
            Err(NotationError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            "H8 W0RD".parse::<Action>(),
            Err(NotationError::InvalidWord(_))
        ));
    }

    #[test]
    fn display_matches_parse() {
        for text in ["H8 CAT", "8H cAT", "15O ZOO", "-AB?", "-"] {
            assert_eq!(text.parse::<Action>().unwrap().to_string(), text);
        }
    }
}
