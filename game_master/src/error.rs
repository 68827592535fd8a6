use wordgame::{IllegalBoardState, IllegalMove, RulesetError};

use crate::{GameState, PlayerId};

/// The error type for the calls into a [`Game`](crate::Game).
#[derive(Debug)]
pub enum GameError {
    NotYourTurn {
        player: PlayerId,
    },
    /// The secret key does not belong to the player.
    Unauthenticated,
    UnknownPlayer(PlayerId),
    InvalidState {
        expected: GameState,
        actual: GameState,
    },
    NoPlayers,
    NoHistoryToRollback,
    /// The last move no longer matches the racks, so it cannot be taken back.
    InconsistentHistory {
        move_nr: u32,
    },
    /// The placement was built wrongly. The turn is not consumed.
    IllegalBoardState(IllegalBoardState),
    /// The move breaks a rule of the game. If `retry_allowed` is false, the
    /// turn has been consumed anyway.
    Rejected {
        err: IllegalMove,
        retry_allowed: bool,
    },
    InvalidConfiguration(String),
    ThreadSpawn(std::io::Error),
}

impl From<IllegalBoardState> for GameError {
    fn from(err: IllegalBoardState) -> Self {
        GameError::IllegalBoardState(err)
    }
}

impl From<RulesetError> for GameError {
    fn from(err: RulesetError) -> Self {
        GameError::InvalidConfiguration(err.to_string())
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::IllegalBoardState(err) => Some(err),
            GameError::Rejected { err, .. } => Some(err),
            GameError::ThreadSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::NotYourTurn { player } => {
                write!(f, "It is not the turn of player {}", player)
            }
            GameError::Unauthenticated => write!(f, "The secret key does not match the player"),
            GameError::UnknownPlayer(player) => write!(f, "There is no player {}", player),
            GameError::InvalidState { expected, actual } => write!(
                f,
                "This needs the game to be {}, but it is {}",
                expected, actual
            ),
            GameError::NoPlayers => write!(f, "Cannot start a game without players"),
            GameError::NoHistoryToRollback => write!(f, "There is no move to take back"),
            GameError::InconsistentHistory { move_nr } => {
                write!(f, "Move {} does not match the racks and cannot be taken back", move_nr)
            }
            GameError::IllegalBoardState(_) => write!(f, "The placement does not fit the board"),
            GameError::Rejected { retry_allowed, .. } => {
                if *retry_allowed {
                    write!(f, "The move was rejected, try again")
                } else {
                    write!(f, "The move was rejected and the turn is lost")
                }
            }
            GameError::InvalidConfiguration(reason) => {
                write!(f, "Invalid configuration: {}", reason)
            }
            GameError::ThreadSpawn(_) => write!(f, "Could not start a thread"),
        }
    }
}
