/// The error type for a move that breaks the rules of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    /// The rack of the player cannot supply these tiles.
    MissingLetters { letters: Vec<char> },
    WordNotInLexicon { word: String },
    MustTouchExistingWord,
    FirstWordTooShortOrOffCenter,
    /// The word needs a blank for `letter`, but it is ambiguous which of
    /// its occurrences the blank stands for.
    BlankPositionRequired { letter: char },
    /// Every letter of the word is already on the board.
    NoTilePlaced,
    /// The word continues into tiles already on the board.
    IncompleteWord { word: String },
    /// Too few tiles are left in the pool to exchange.
    ExchangeNotAllowed { pool_size: usize },
}

impl IllegalMove {
    /// Whether the player may try again in the same turn, even in a game
    /// that does not accept retries.
    pub fn accepts_retry(&self) -> bool {
        matches!(
            self,
            IllegalMove::MissingLetters { .. } | IllegalMove::BlankPositionRequired { .. }
        )
    }
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::MissingLetters { letters } => {
                let letters: String = letters.iter().collect();
                write!(f, "Tried to play letters that are not on the rack: {}", letters)
            }
            IllegalMove::WordNotInLexicon { word } => {
                write!(f, "The word {} is not in the lexicon", word)
            }
            IllegalMove::MustTouchExistingWord => {
                write!(f, "The word must touch a word already on the board")
            }
            IllegalMove::FirstWordTooShortOrOffCenter => write!(
                f,
                "The first word must have at least two letters and cover the center cell"
            ),
            IllegalMove::BlankPositionRequired { letter } => write!(
                f,
                "Specify which {} is played with a blank by writing it in lower case",
                letter
            ),
            IllegalMove::NoTilePlaced => {
                write!(f, "The word must add at least one tile to the board")
            }
            IllegalMove::IncompleteWord { word } => write!(
                f,
                "The word {} is directly followed or preceded by other letters",
                word
            ),
            IllegalMove::ExchangeNotAllowed { pool_size } => write!(
                f,
                "Exchanging needs more tiles in the pool, only {} are left",
                pool_size
            ),
        }
    }
}
