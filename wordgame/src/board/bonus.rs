use serde::{Deserialize, Serialize};

use crate::CLASSIC_BOARD_SIZE;

/// The bonus class of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bonus {
    /// The sentinel ring around the playable area.
    Border,
    Plain,
    TripleWord,
    DoubleWord,
    TripleLetter,
    DoubleLetter,
}

impl Bonus {
    pub fn word_factor(self) -> u32 {
        match self {
            Bonus::TripleWord => 3,
            Bonus::DoubleWord => 2,
            _ => 1,
        }
    }

    pub fn letter_factor(self) -> u32 {
        match self {
            Bonus::TripleLetter => 3,
            Bonus::DoubleLetter => 2,
            _ => 1,
        }
    }

    /// The bonus of the cell at `(x, y)` on a board with `size` playable rows,
    /// where rows and columns `0` and `size + 1` are the border.
    ///
    /// The classic layout has an 8-fold symmetry, so the coordinates are first
    /// folded into the triangle `1 <= x <= y <= 8`. Boards of any other
    /// size have no bonus cells.
    pub fn for_cell(size: usize, x: usize, y: usize) -> Bonus {
        if x == 0 || y == 0 || x > size || y > size {
            return Bonus::Border;
        }
        if size != CLASSIC_BOARD_SIZE {
            return Bonus::Plain;
        }

        let mid = size / 2 + 1;
        let fold = |v: usize| if v > mid { size + 1 - v } else { v };
        let (mut x, mut y) = (fold(x), fold(y));
        if x > y {
            std::mem::swap(&mut x, &mut y);
        }

        match (x, y) {
            (1, 1) | (1, 8) => Bonus::TripleWord,
            (6, 6) | (2, 6) => Bonus::TripleLetter,
            (7, 7) | (1, 4) | (3, 7) | (4, 8) => Bonus::DoubleLetter,
            (x, y) if x == y => Bonus::DoubleWord,
            _ => Bonus::Plain,
        }
    }
}
