use serde::{Deserialize, Serialize};

use crate::{Coordinate, Direction};

/// A word to put on the board, starting at `start` and running in `direction`.
///
/// The word includes letters that are already on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub start: Coordinate,
    pub direction: Direction,
    /// Upper-case letters.
    pub word: String,
    /// Bit `i` is set when the `i`-th letter is to be played with a blank.
    /// When not needed, this can be omitted from the JSON serialization.
    #[serde(default)]
    pub blank_mask: u32,
}

impl Placement {
    /// Creates a placement from a word in which lower-case letters are
    /// played with blanks.
    pub fn new(start: Coordinate, direction: Direction, word: &str) -> Self {
        let mut blank_mask = 0;
        for (i, c) in word.chars().enumerate().take(32) {
            if c.is_lowercase() {
                blank_mask |= 1 << i;
            }
        }
        Self {
            start,
            direction,
            word: word.to_uppercase(),
            blank_mask,
        }
    }

    pub fn is_played_by_blank(&self, index: usize) -> bool {
        index < 32 && self.blank_mask & (1 << index) != 0
    }

    /// Number of letters, including those already on the board.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// The same placement, with the letter at `index` played by a blank.
    #[must_use]
    pub fn with_blank_at(mut self, index: usize) -> Self {
        if index < 32 {
            self.blank_mask |= 1 << index;
        }
        self
    }

    /// The word as it would be written in notation, blanks in lower case.
    pub fn marked_word(&self) -> String {
        self.word
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if self.is_played_by_blank(i) {
                    c.to_ascii_lowercase()
                } else {
                    c
                }
            })
            .collect()
    }
}

/// What a player does in their turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    PlaceWord(Placement),
    /// Puts the letters back into the pool and draws as many new ones.
    /// A blank is requested as [`BLANK`](crate::BLANK).
    Exchange { letters: Vec<char> },
    SkipTurn,
}

impl Action {
    pub fn is_skip(&self) -> bool {
        matches!(self, Action::SkipTurn)
    }

    /// An exchange of no tiles is a skip, as `-` is in notation.
    pub fn normalized(self) -> Self {
        match self {
            Action::Exchange { letters } if letters.is_empty() => Action::SkipTurn,
            action => action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_letters_are_blanks() {
        let placement = Placement::new(Coordinate::new(8, 8), Direction::Horizontal, "pIzZa");
        assert_eq!(placement.word, "PIZZA");
        assert!(placement.is_played_by_blank(0));
        assert!(!placement.is_played_by_blank(1));
        assert!(placement.is_played_by_blank(4));
        assert_eq!(placement.marked_word(), "pIzZa");
        assert_eq!(placement.len(), 5);

        let more = placement.with_blank_at(1);
        assert_eq!(more.marked_word(), "pizZa");
    }

    #[test]
    fn json_shape() {
        let action = Action::PlaceWord(Placement::new(
            Coordinate::new(8, 8),
            Direction::Vertical,
            "AB",
        ));
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "PlaceWord");
        assert_eq!(json["direction"], "vertical");
        assert_eq!(json["word"], "AB");

        let parsed: Action = serde_json::from_str(
            r#"{"type":"PlaceWord","start":{"x":8,"y":8},"direction":"vertical","word":"AB"}"#,
        )
        .unwrap();
        assert_eq!(parsed, action);

        let skip: Action = serde_json::from_str(r#"{"type":"SkipTurn"}"#).unwrap();
        assert!(skip.is_skip());
    }

    #[test]
    fn empty_exchange_is_a_skip() {
        let empty: Action = serde_json::from_str(r#"{"type":"Exchange","letters":[]}"#).unwrap();
        assert!(!empty.is_skip());
        assert!(empty.normalized().is_skip());

        let exchange = Action::Exchange {
            letters: vec!['A', '?'],
        };
        assert_eq!(exchange.clone().normalized(), exchange);
    }
}
