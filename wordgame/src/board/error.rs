use crate::{Coordinate, Tile};

/// The error type for [`Board::evaluate()`](crate::Board::evaluate) and
/// [`Board::commit()`](crate::Board::commit).
///
/// These indicate a placement that was built wrongly by the caller, not a
/// move that breaks the rules of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalBoardState {
    EmptyWord,
    OffBoard {
        x: i32,
        y: i32,
    },
    Conflict {
        at: Coordinate,
        existing: char,
        requested: char,
    },
    UnknownLetter(char),
    CellOccupied {
        at: Coordinate,
    },
    TileCountMismatch {
        expected: usize,
        got: usize,
    },
    TileMismatch {
        at: Coordinate,
        expected: char,
        tile: Tile,
    },
}

impl std::error::Error for IllegalBoardState {}

impl std::fmt::Display for IllegalBoardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalBoardState::EmptyWord => write!(f, "The placement contains no letter"),
            IllegalBoardState::OffBoard { x, y } => {
                write!(f, "The placement leaves the board at ({}, {})", x, y)
            }
            IllegalBoardState::Conflict {
                at,
                existing,
                requested,
            } => write!(
                f,
                "Cell {} already holds '{}', cannot place '{}' there",
                at, existing, requested
            ),
            IllegalBoardState::UnknownLetter(c) => {
                write!(f, "'{}' is not a letter of this game", c)
            }
            IllegalBoardState::CellOccupied { at } => {
                write!(f, "Cell {} was filled since the move was evaluated", at)
            }
            IllegalBoardState::TileCountMismatch { expected, got } => write!(
                f,
                "The move needs {} new tiles, but {} were supplied",
                expected, got
            ),
            IllegalBoardState::TileMismatch { at, expected, tile } => write!(
                f,
                "Tile {} cannot be placed on {} where '{}' is expected",
                tile, at, expected
            ),
        }
    }
}
