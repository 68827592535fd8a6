use std::collections::HashSet;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

/// The side length of the classic board, the only size with bonus cells.
pub const CLASSIC_BOARD_SIZE: usize = 15;

/// Board sizes are limited by the column letters `A` to `Z`.
pub const MAX_BOARD_SIZE: usize = 25;

/// How many tiles of a letter are in the game, and what each is worth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSpec {
    pub letter: char,
    pub count: usize,
    pub points: u32,
}

/// The rules metadata that comes with a lexicon: letter distribution,
/// letter values, number of blanks and board size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RulesetData")]
pub struct Ruleset {
    letters: Vec<LetterSpec>,
    blanks: usize,
    board_size: usize,
}

/// The unchecked shape of a deserialized [`Ruleset`].
#[derive(Deserialize)]
struct RulesetData {
    letters: Vec<LetterSpec>,
    blanks: usize,
    board_size: usize,
}

impl TryFrom<RulesetData> for Ruleset {
    type Error = RulesetError;

    fn try_from(data: RulesetData) -> Result<Self, Self::Error> {
        Ruleset::new(data.letters, data.blanks, data.board_size)
    }
}

/// The error type for [`Ruleset::new()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesetError {
    EmptyDistribution,
    InvalidLetter(char),
    DuplicateLetter(char),
    InvalidBoardSize(usize),
}

impl std::error::Error for RulesetError {}

impl std::fmt::Display for RulesetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesetError::EmptyDistribution => write!(f, "The letter distribution is empty"),
            RulesetError::InvalidLetter(c) => {
                write!(f, "'{}' is not a letter between A and Z", c)
            }
            RulesetError::DuplicateLetter(c) => {
                write!(f, "The letter '{}' appears twice in the distribution", c)
            }
            RulesetError::InvalidBoardSize(size) => write!(
                f,
                "The board size must be odd and between 1 and {}, got {}",
                MAX_BOARD_SIZE, size
            ),
        }
    }
}

const ENGLISH: [(char, usize, u32); 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];

const FRENCH: [(char, usize, u32); 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 3, 2),
    ('E', 15, 1),
    ('F', 2, 4),
    ('G', 2, 2),
    ('H', 2, 4),
    ('I', 8, 1),
    ('J', 1, 8),
    ('K', 1, 10),
    ('L', 5, 1),
    ('M', 3, 2),
    ('N', 6, 1),
    ('O', 6, 1),
    ('P', 2, 3),
    ('Q', 1, 8),
    ('R', 6, 1),
    ('S', 6, 1),
    ('T', 6, 1),
    ('U', 6, 1),
    ('V', 2, 4),
    ('W', 1, 10),
    ('X', 1, 10),
    ('Y', 1, 10),
    ('Z', 1, 10),
];

impl Ruleset {
    /// Creates a validated ruleset. Letters are upper-cased.
    pub fn new(
        letters: Vec<LetterSpec>,
        blanks: usize,
        board_size: usize,
    ) -> Result<Self, RulesetError> {
        if letters.is_empty() {
            return Err(RulesetError::EmptyDistribution);
        }
        if board_size == 0 || board_size > MAX_BOARD_SIZE || board_size % 2 == 0 {
            return Err(RulesetError::InvalidBoardSize(board_size));
        }
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(letters.len());
        for spec in letters {
            if !spec.letter.is_ascii_alphabetic() {
                return Err(RulesetError::InvalidLetter(spec.letter));
            }
            let letter = spec.letter.to_ascii_uppercase();
            if !seen.insert(letter) {
                return Err(RulesetError::DuplicateLetter(letter));
            }
            normalized.push(LetterSpec { letter, ..spec });
        }
        Ok(Self {
            letters: normalized,
            blanks,
            board_size,
        })
    }

    /// The English distribution: 98 letters and 2 blanks on a 15 x 15 board.
    pub fn english() -> Self {
        Self::from_table(&ENGLISH)
    }

    /// The French distribution: 100 letters and 2 blanks on a 15 x 15 board.
    pub fn french() -> Self {
        Self::from_table(&FRENCH)
    }

    fn from_table(table: &[(char, usize, u32)]) -> Self {
        Self {
            letters: table
                .iter()
                .map(|&(letter, count, points)| LetterSpec {
                    letter,
                    count,
                    points,
                })
                .collect(),
            blanks: 2,
            board_size: CLASSIC_BOARD_SIZE,
        }
    }

    pub fn letter_distribution(&self) -> &[LetterSpec] {
        &self.letters
    }

    pub fn blank_count(&self) -> usize {
        self.blanks
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// The value of a letter, case-insensitive.
    pub fn points(&self, letter: char) -> Option<u32> {
        let letter = letter.to_ascii_uppercase();
        self.letters
            .iter()
            .find(|spec| spec.letter == letter)
            .map(|spec| spec.points)
    }

    /// The number of tiles in a full bag, blanks included.
    pub fn tile_count(&self) -> usize {
        self.letters.iter().map(|spec| spec.count).sum::<usize>() + self.blanks
    }

    /// Runs the checks of [`Ruleset::new()`] again.
    pub fn validate(&self) -> Result<(), RulesetError> {
        Ruleset::new(self.letters.clone(), self.blanks, self.board_size).map(|_| ())
    }
}

/// Answers whether a word may be played, and which rules apply.
///
/// How the words are stored and loaded is up to the implementation.
pub trait Lexicon: Send + Sync {
    /// `word` is given in uppercase.
    fn is_admissible(&self, word: &str) -> bool;

    fn ruleset(&self) -> &Ruleset;
}

/// A [`Lexicon`] backed by an in-memory set of words.
#[derive(Clone, Debug)]
pub struct WordList {
    words: HashSet<String>,
    ruleset: Ruleset,
}

impl WordList {
    pub fn from_words<I, S>(words: I, ruleset: Ruleset) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().trim().to_uppercase())
                .filter(|word| !word.is_empty())
                .collect(),
            ruleset,
        }
    }

    /// Reads one word per line. Empty lines and lines starting with `#` are skipped.
    pub fn from_reader<R: BufRead>(reader: R, ruleset: Ruleset) -> std::io::Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.push(word.to_owned());
        }
        Ok(Self::from_words(words, ruleset))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    fn is_admissible(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rulesets_are_valid() {
        for ruleset in [Ruleset::english(), Ruleset::french()] {
            let rebuilt = Ruleset::new(
                ruleset.letter_distribution().to_vec(),
                ruleset.blank_count(),
                ruleset.board_size(),
            );
            assert_eq!(rebuilt, Ok(ruleset));
        }
        assert_eq!(Ruleset::english().tile_count(), 100);
        assert_eq!(Ruleset::french().tile_count(), 102);
        assert_eq!(Ruleset::english().points('q'), Some(10));
        assert_eq!(Ruleset::french().points('K'), Some(10));
    }

    #[test]
    fn deserialization_validates() {
        let json = serde_json::to_string(&Ruleset::english()).unwrap();
        let parsed: Ruleset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Ruleset::english());
        assert_eq!(parsed.validate(), Ok(()));

        let bad_letter = r#"{"letters":[{"letter":"1","count":1,"points":1}],"blanks":0,"board_size":15}"#;
        assert!(serde_json::from_str::<Ruleset>(bad_letter).is_err());
        let too_large = r#"{"letters":[{"letter":"A","count":1,"points":1}],"blanks":0,"board_size":301}"#;
        assert!(serde_json::from_str::<Ruleset>(too_large).is_err());
        let lower = r#"{"letters":[{"letter":"b","count":2,"points":3}],"blanks":1,"board_size":5}"#;
        let parsed: Ruleset = serde_json::from_str(lower).unwrap();
        assert_eq!(parsed.points('B'), Some(3));
        assert_eq!(parsed.tile_count(), 3);
    }

    #[test]
    fn invalid_rulesets_are_refused() {
        let a = LetterSpec {
            letter: 'a',
            count: 3,
            points: 1,
        };
        assert_eq!(
            Ruleset::new(vec![], 2, 15),
            Err(RulesetError::EmptyDistribution)
        );
        assert_eq!(
            Ruleset::new(vec![a], 2, 14),
            Err(RulesetError::InvalidBoardSize(14))
        );
        assert_eq!(
            Ruleset::new(vec![a], 2, 27),
            Err(RulesetError::InvalidBoardSize(27))
        );
        assert_eq!(
            Ruleset::new(vec![a, LetterSpec { letter: 'A', ..a }], 2, 15),
            Err(RulesetError::DuplicateLetter('A'))
        );
        assert_eq!(
            Ruleset::new(vec![LetterSpec { letter: '3', ..a }], 2, 15),
            Err(RulesetError::InvalidLetter('3'))
        );
        let ruleset = Ruleset::new(vec![a], 0, 9).unwrap();
        assert_eq!(ruleset.letter_distribution()[0].letter, 'A');
    }

    #[test]
    fn word_list_is_case_insensitive() {
        let input = "# comment\ncat\n\n  Dog \n";
        let words = WordList::from_reader(input.as_bytes(), Ruleset::english()).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.is_admissible("CAT"));
        assert!(words.is_admissible("dog"));
        assert!(!words.is_admissible("COMMENT"));
        assert!(!words.is_admissible(""));
    }
}
