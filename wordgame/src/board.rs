mod bonus;
mod coordinate;
mod error;

pub use bonus::*;
pub use coordinate::*;
pub use error::*;

use serde::{Deserialize, Serialize};

use crate::{Placement, Ruleset, Tile, BLANK, RACK_SIZE};

/// Extra points for placing a full rack in one move.
pub const BINGO_BONUS: u32 = 50;

/// A tile on the board, and the move that put it there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub tile: Tile,
    pub move_nr: u32,
}

/// One square of the grid.
///
/// Cells do not know their own position; the [`Board`] maps coordinates to
/// cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    bonus: Bonus,
    occupant: Option<Occupant>,
}

impl Cell {
    pub fn bonus(&self) -> Bonus {
        self.bonus
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The square grid of cells, surrounded by a ring of border cells.
///
/// Border cells are never filled, so scanning along a line always stops at
/// the border at the latest.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    /// `(size + 2)²` cells in row-major order, border included.
    cells: Vec<Cell>,
    letter_points: [Option<u32>; 26],
}

/// A cell that a placement fills with a new tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilledCell {
    pub at: Coordinate,
    /// Position of the letter in the placed word.
    pub index: usize,
    pub letter: char,
    pub blank: bool,
}

/// Everything [`Board::evaluate()`] finds out about a placement.
///
/// It is also what's needed to take the move back with [`Board::revert()`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMetaInfo {
    pub placement: Placement,
    /// All cells of the placed word, in order.
    pub path: Vec<Coordinate>,
    /// The cells that are empty now, in order.
    pub filled: Vec<FilledCell>,
    /// The words formed across the placement direction, in order.
    pub crosswords: Vec<String>,
    pub score: u32,
    pub is_bingo: bool,
    /// Does the path run over at least one tile already on the board?
    pub overlaps: bool,
    /// Is there a tile right before the first or after the last letter?
    /// If so, the placed word is only part of a longer one.
    pub touches_ends: bool,
}

impl MoveMetaInfo {
    pub fn primary_word(&self) -> &str {
        &self.placement.word
    }

    /// The letters that must come from the rack as letter tiles.
    pub fn required_letters(&self) -> Vec<char> {
        self.filled
            .iter()
            .filter(|cell| !cell.blank)
            .map(|cell| cell.letter)
            .collect()
    }

    pub fn required_blanks(&self) -> usize {
        self.filled.iter().filter(|cell| cell.blank).count()
    }

    /// One request per new tile in path order, blanks requested as [`BLANK`].
    ///
    /// Removing these from a rack yields the tiles in the order
    /// [`Board::commit()`] expects them.
    pub fn requested_tiles(&self) -> Vec<char> {
        self.filled
            .iter()
            .map(|cell| if cell.blank { BLANK } else { cell.letter })
            .collect()
    }

    /// The distinct words to check against the lexicon. A single letter is
    /// not a word of its own.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = Vec::with_capacity(self.crosswords.len() + 1);
        if self.placement.len() > 1 {
            words.push(self.placement.word.clone());
        }
        for crossword in &self.crosswords {
            if !words.contains(crossword) {
                words.push(crossword.clone());
            }
        }
        words
    }

    pub fn covers(&self, at: Coordinate) -> bool {
        self.path.contains(&at)
    }
}

/// A tile on the board, as reported by [`Board::to_snapshot()`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub at: Coordinate,
    pub letter: char,
    pub blank: bool,
    pub points: u32,
    pub move_nr: u32,
}

/// A read-only copy of the tiles on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    /// Sorted by row, then column.
    pub tiles: Vec<PlacedTile>,
}

impl Board {
    /// Creates an empty board with the size and letter values of the ruleset.
    pub fn new(ruleset: &Ruleset) -> Self {
        let size = ruleset.board_size();
        let width = size + 2;
        let mut cells = Vec::with_capacity(width * width);
        for y in 0..width {
            for x in 0..width {
                cells.push(Cell {
                    bonus: Bonus::for_cell(size, x, y),
                    occupant: None,
                });
            }
        }

        let mut letter_points = [None; 26];
        for spec in ruleset.letter_distribution() {
            letter_points[(spec.letter as u8 - b'A') as usize] = Some(spec.points);
        }

        Self {
            size,
            cells,
            letter_points,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The cell the first word has to cover.
    pub fn center(&self) -> Coordinate {
        let center = (self.size / 2 + 1) as u8;
        Coordinate::new(center, center)
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        let size = self.size as i32;
        (1..=size).contains(&x) && (1..=size).contains(&y)
    }

    /// `None` outside of the playable area.
    pub fn cell(&self, at: Coordinate) -> Option<&Cell> {
        let (x, y) = (at.x as i32, at.y as i32);
        self.is_in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    pub fn get(&self, at: Coordinate) -> Option<Occupant> {
        self.cell(at).and_then(Cell::occupant)
    }

    pub fn bonus(&self, at: Coordinate) -> Bonus {
        self.cell(at).map_or(Bonus::Border, Cell::bonus)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// The number of tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Computes the effects of a placement, without changing the board.
    ///
    /// This is the core function of this type. It finds the cells to fill, the
    /// crosswords that would be formed and the score: letter bonuses and word
    /// bonuses only count for newly filled cells, a word bonus multiplies
    /// every new word running through its cell once, and placing a full rack
    /// earns [`BINGO_BONUS`].
    ///
    /// This function does not check the lexicon, the rack of the player or the
    /// rules for connecting words; see the game engine for that.
    pub fn evaluate(&self, placement: &Placement) -> Result<MoveMetaInfo, IllegalBoardState> {
        let word: Vec<char> = placement.word.chars().collect();
        if word.is_empty() {
            return Err(IllegalBoardState::EmptyWord);
        }
        let (dx, dy) = placement.direction.step();
        let cross_direction = placement.direction.other();
        let (start_x, start_y) = (placement.start.x as i32, placement.start.y as i32);

        let mut path = Vec::with_capacity(word.len());
        let mut filled = Vec::new();
        let mut crosswords = Vec::new();
        let mut word_points = 0;
        let mut word_factor = 1;
        let mut crossword_points = 0;
        let mut overlaps = false;

        for (i, &c) in word.iter().enumerate() {
            let c = c.to_ascii_uppercase();
            let (x, y) = (start_x + dx * i as i32, start_y + dy * i as i32);
            if !self.is_in_bounds(x, y) {
                return Err(IllegalBoardState::OffBoard { x, y });
            }
            let at = Coordinate::new(x as u8, y as u8);
            path.push(at);

            let cell = self.cells[self.index(x, y)];
            match cell.occupant {
                Some(occupant) => {
                    let existing = occupant.tile.char().unwrap_or(BLANK);
                    if !existing.eq_ignore_ascii_case(&c) {
                        return Err(IllegalBoardState::Conflict {
                            at,
                            existing,
                            requested: c,
                        });
                    }
                    overlaps = true;
                    word_points += occupant.tile.points();
                }
                None => {
                    let blank = placement.is_played_by_blank(i);
                    let letter_points = self.letter_points(c)?;
                    let base = if blank { 0 } else { letter_points };
                    let value = base * cell.bonus.letter_factor();
                    word_points += value;
                    word_factor *= cell.bonus.word_factor();

                    if let Some((crossword, points)) = self.crossword(x, y, cross_direction, c, value)
                    {
                        crossword_points += points * cell.bonus.word_factor();
                        crosswords.push(crossword);
                    }
                    filled.push(FilledCell {
                        at,
                        index: i,
                        letter: c,
                        blank,
                    });
                }
            }
        }

        let is_bingo = filled.len() == RACK_SIZE;
        let mut score = crossword_points;
        if word.len() > 1 {
            score += word_points * word_factor;
        }
        if is_bingo {
            score += BINGO_BONUS;
        }

        let len = word.len() as i32;
        let touches_ends = self.occupant_at(start_x - dx, start_y - dy).is_some()
            || self
                .occupant_at(start_x + dx * len, start_y + dy * len)
                .is_some();

        Ok(MoveMetaInfo {
            placement: placement.clone(),
            path,
            filled,
            crosswords,
            score,
            is_bingo,
            overlaps,
            touches_ends,
        })
    }

    /// Puts the tiles of an evaluated move on the board, giving blanks their letters.
    ///
    /// `tiles` must be in the order of [`MoveMetaInfo::filled`]. Nothing is
    /// changed if any of the checks fails. Must only be called once per move.
    pub fn commit(
        &mut self,
        meta: &MoveMetaInfo,
        tiles: &[Tile],
        move_nr: u32,
    ) -> Result<(), IllegalBoardState> {
        if tiles.len() != meta.filled.len() {
            return Err(IllegalBoardState::TileCountMismatch {
                expected: meta.filled.len(),
                got: tiles.len(),
            });
        }
        for (cell, tile) in meta.filled.iter().zip(tiles) {
            match self.cell(cell.at) {
                None => {
                    return Err(IllegalBoardState::OffBoard {
                        x: cell.at.x as i32,
                        y: cell.at.y as i32,
                    })
                }
                Some(c) if !c.is_empty() => {
                    return Err(IllegalBoardState::CellOccupied { at: cell.at })
                }
                Some(_) => {}
            }
            let fits = if cell.blank {
                tile.is_blank()
            } else {
                tile.matches(cell.letter)
            };
            if !fits {
                return Err(IllegalBoardState::TileMismatch {
                    at: cell.at,
                    expected: cell.letter,
                    tile: *tile,
                });
            }
        }

        for (cell, &tile) in meta.filled.iter().zip(tiles) {
            let idx = self.index(cell.at.x as i32, cell.at.y as i32);
            self.cells[idx].occupant = Some(Occupant {
                tile: tile.with_assigned(cell.letter),
                move_nr,
            });
        }
        Ok(())
    }

    /// Takes the tiles of a committed move off the board again.
    ///
    /// Only the cells the move filled are cleared. The removed tiles are
    /// returned with their blank letters cleared, in the order of
    /// [`MoveMetaInfo::filled`].
    pub fn revert(&mut self, meta: &MoveMetaInfo) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(meta.filled.len());
        for cell in &meta.filled {
            let (x, y) = (cell.at.x as i32, cell.at.y as i32);
            if !self.is_in_bounds(x, y) {
                continue;
            }
            let idx = self.index(x, y);
            if let Some(occupant) = self.cells[idx].occupant.take() {
                tiles.push(occupant.tile.cleared());
            }
        }
        tiles
    }

    /// The word of at least two letters running through `at` along `direction`.
    pub fn word_at(&self, at: Coordinate, direction: Direction) -> Option<String> {
        let (x, y) = (at.x as i32, at.y as i32);
        if !self.is_in_bounds(x, y) || self.occupant_at(x, y).is_none() {
            return None;
        }
        let (dx, dy) = direction.step();
        let (mut sx, mut sy) = (x, y);
        while self.occupant_at(sx - dx, sy - dy).is_some() {
            sx -= dx;
            sy -= dy;
        }
        let mut word = String::new();
        while let Some(occupant) = self.occupant_at(sx, sy) {
            word.push(occupant.tile.char().unwrap_or(BLANK));
            sx += dx;
            sy += dy;
        }
        (word.chars().count() > 1).then_some(word)
    }

    /// The horizontal and vertical words running through `at`.
    pub fn words_through(&self, at: Coordinate) -> Vec<String> {
        [Direction::Horizontal, Direction::Vertical]
            .into_iter()
            .filter_map(|direction| self.word_at(at, direction))
            .collect()
    }

    pub fn to_snapshot(&self) -> BoardSnapshot {
        let mut tiles = Vec::new();
        for y in 1..=self.size as i32 {
            for x in 1..=self.size as i32 {
                if let Some(occupant) = self.occupant_at(x, y) {
                    tiles.push(PlacedTile {
                        at: Coordinate::new(x as u8, y as u8),
                        letter: occupant.tile.char().unwrap_or(BLANK),
                        blank: occupant.tile.is_blank(),
                        points: occupant.tile.points(),
                        move_nr: occupant.move_nr,
                    });
                }
            }
        }
        BoardSnapshot {
            size: self.size,
            tiles,
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * (self.size + 2) + x as usize
    }

    // Border cells and anything beyond count as empty.
    fn occupant_at(&self, x: i32, y: i32) -> Option<Occupant> {
        let width = self.size as i32 + 2;
        if !(0..width).contains(&x) || !(0..width).contains(&y) {
            return None;
        }
        self.cells[self.index(x, y)].occupant
    }

    fn letter_points(&self, c: char) -> Result<u32, IllegalBoardState> {
        if !c.is_ascii_uppercase() {
            return Err(IllegalBoardState::UnknownLetter(c));
        }
        self.letter_points[(c as u8 - b'A') as usize].ok_or(IllegalBoardState::UnknownLetter(c))
    }

    // The word formed across the placement by putting `c` on the empty cell (x, y),
    // and its points before the word bonus. `None` if `c` stands alone.
    fn crossword(
        &self,
        x: i32,
        y: i32,
        direction: Direction,
        c: char,
        value: u32,
    ) -> Option<(String, u32)> {
        let (dx, dy) = direction.step();
        let mut points = value;

        let mut before = Vec::new();
        let (mut cx, mut cy) = (x - dx, y - dy);
        while let Some(occupant) = self.occupant_at(cx, cy) {
            before.push(occupant.tile.char().unwrap_or(BLANK));
            points += occupant.tile.points();
            cx -= dx;
            cy -= dy;
        }

        let mut crossword: String = before.into_iter().rev().collect();
        crossword.push(c);

        let (mut cx, mut cy) = (x + dx, y + dy);
        while let Some(occupant) = self.occupant_at(cx, cy) {
            crossword.push(occupant.tile.char().unwrap_or(BLANK));
            points += occupant.tile.points();
            cx += dx;
            cy += dy;
        }

        (crossword.chars().count() > 1).then_some((crossword, points))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::{arbitrary::BoardWithPlacement, LetterSpec, TileId};

    // Letter tiles for the word, blanks where the placement asks for them.
    fn tiles_for(meta: &MoveMetaInfo, ruleset: &Ruleset) -> Vec<Tile> {
        meta.filled
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let id = TileId(1000 + i as u16);
                if cell.blank {
                    Tile::blank(id)
                } else {
                    Tile::letter(id, cell.letter, ruleset.points(cell.letter).unwrap())
                }
            })
            .collect()
    }

    fn place(board: &mut Board, ruleset: &Ruleset, notation: &str, word: &str) -> MoveMetaInfo {
        let placement = Placement::from_notation(notation, word).unwrap();
        let meta = board.evaluate(&placement).unwrap();
        let tiles = tiles_for(&meta, ruleset);
        board.commit(&meta, &tiles, 1).unwrap();
        meta
    }

    quickcheck! {
        fn evaluate_has_no_side_effects(input: BoardWithPlacement) -> bool {
            let BoardWithPlacement { board, placement } = input;
            let before = board.to_snapshot();
            let first = board.evaluate(&placement);
            let second = board.evaluate(&placement);
            first == second && board.to_snapshot() == before
        }

        fn commit_changes_only_new_cells(input: BoardWithPlacement) -> bool {
            let BoardWithPlacement { mut board, placement } = input;
            let ruleset = Ruleset::english();
            let before = board.to_snapshot();
            let Ok(meta) = board.evaluate(&placement) else { return true };
            board.commit(&meta, &tiles_for(&meta, &ruleset), 99).unwrap();
            let after = board.to_snapshot();
            let kept = before.tiles.iter().all(|tile| after.tiles.contains(tile));
            let added = after.tiles.len() == before.tiles.len() + meta.filled.len();
            board.revert(&meta);
            kept && added && board.to_snapshot() == before
        }
    }

    #[test]
    fn first_word_on_center() {
        let ruleset = Ruleset::english();
        let board = Board::new(&ruleset);
        assert!(board.is_empty());
        assert_eq!(board.center(), Coordinate::new(8, 8));

        let meta = board
            .evaluate(&Placement::from_notation("H8", "CAT").unwrap())
            .unwrap();
        // C + A + T on plain cells, doubled by the center
        assert_eq!(meta.score, (3 + 1 + 1) * 2);
        assert_eq!(meta.required_letters(), vec!['C', 'A', 'T']);
        assert_eq!(meta.required_blanks(), 0);
        assert!(meta.crosswords.is_empty());
        assert!(meta.covers(board.center()));
        assert!(!meta.overlaps);
        assert!(!meta.touches_ends);
        assert_eq!(meta.words(), vec!["CAT".to_string()]);
    }

    #[test]
    fn crossing_word_does_not_rescore_the_first() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        place(&mut board, &ruleset, "H8", "CAT");

        // B on I7 (double letter), A already there, T on I9 (double letter)
        let meta = board
            .evaluate(&Placement::from_notation("7I", "BAT").unwrap())
            .unwrap();
        assert_eq!(meta.score, 3 * 2 + 1 + 2);
        assert!(meta.overlaps);
        assert_eq!(meta.required_letters(), vec!['B', 'T']);
    }

    #[test]
    fn crosswords_are_scored_once_each() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        place(&mut board, &ruleset, "H8", "CAT");

        // A below A on I9 (double letter), N below T on J9
        let meta = board
            .evaluate(&Placement::from_notation("I9", "AN").unwrap())
            .unwrap();
        assert_eq!(meta.crosswords, vec!["AA".to_string(), "TN".to_string()]);
        // AN: 2 + 1, AA: 1 + 2, TN: 1 + 1
        assert_eq!(meta.score, 3 + 3 + 2);
        assert_eq!(
            meta.words(),
            vec!["AN".to_string(), "AA".to_string(), "TN".to_string()]
        );
    }

    #[test]
    fn word_bonus_applies_to_each_new_word_through_the_cell() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        place(&mut board, &ruleset, "E4", "A");

        // T lands on E5, a double word cell, completing A-T downwards too.
        let meta = board
            .evaluate(&Placement::from_notation("D5", "AT").unwrap())
            .unwrap();
        assert_eq!(meta.crosswords, vec!["AT".to_string()]);
        assert_eq!(meta.score, (1 + 1) * 2 + (1 + 1) * 2);
    }

    #[test]
    fn covered_bonus_cells_do_not_count_again() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        place(&mut board, &ruleset, "H8", "CAT");

        // Extending CAT to CATS only adds S; the center no longer doubles.
        let meta = board
            .evaluate(&Placement::from_notation("H8", "CATS").unwrap())
            .unwrap();
        assert_eq!(meta.score, 3 + 1 + 1 + 1);
    }

    #[test]
    fn blanks_score_zero() {
        let ruleset = Ruleset::english();
        let board = Board::new(&ruleset);
        let meta = board
            .evaluate(&Placement::from_notation("H8", "qI").unwrap())
            .unwrap();
        assert_eq!(meta.required_blanks(), 1);
        assert_eq!(meta.requested_tiles(), vec![BLANK, 'I']);
        assert_eq!(meta.score, 2);
    }

    #[test]
    fn bingo_on_plain_board() {
        let letters = Ruleset::english().letter_distribution().to_vec();
        let ruleset = Ruleset::new(letters, 2, 9).unwrap();
        let board = Board::new(&ruleset);
        let meta = board
            .evaluate(&Placement::from_notation("A5", "RETAINS").unwrap())
            .unwrap();
        assert!(meta.is_bingo);
        assert_eq!(meta.score, 7 + BINGO_BONUS);
    }

    #[test]
    fn caller_errors() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        place(&mut board, &ruleset, "H8", "CAT");

        assert_eq!(
            board.evaluate(&Placement::from_notation("M8", "ABCD").unwrap()),
            Err(IllegalBoardState::OffBoard { x: 16, y: 8 })
        );
        assert_eq!(
            board.evaluate(&Placement::from_notation("H8", "DOG").unwrap()),
            Err(IllegalBoardState::Conflict {
                at: Coordinate::new(8, 8),
                existing: 'C',
                requested: 'D'
            })
        );
        // Case does not matter over existing tiles
        assert!(board
            .evaluate(&Placement::from_notation("H8", "caTS").unwrap())
            .is_ok());

        let small = Ruleset::new(
            vec![LetterSpec {
                letter: 'A',
                count: 10,
                points: 1,
            }],
            0,
            15,
        )
        .unwrap();
        assert_eq!(
            Board::new(&small).evaluate(&Placement::from_notation("H8", "AB").unwrap()),
            Err(IllegalBoardState::UnknownLetter('B'))
        );
    }

    #[test]
    fn commit_checks_tiles() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        let meta = board
            .evaluate(&Placement::from_notation("H8", "Cat").unwrap())
            .unwrap();
        let wrong = [
            Tile::letter(TileId(0), 'C', 3),
            Tile::letter(TileId(1), 'A', 1),
            Tile::letter(TileId(2), 'T', 1),
        ];
        assert!(matches!(
            board.commit(&meta, &wrong, 1),
            Err(IllegalBoardState::TileMismatch { .. })
        ));
        assert_eq!(
            board.commit(&meta, &wrong[..2], 1),
            Err(IllegalBoardState::TileCountMismatch {
                expected: 3,
                got: 2
            })
        );
        assert!(board.is_empty());

        let tiles = tiles_for(&meta, &ruleset);
        board.commit(&meta, &tiles, 1).unwrap();
        assert_eq!(board.tile_count(), 3);
        assert_eq!(
            board.get(Coordinate::new(9, 8)).unwrap().tile.to_string(),
            "a"
        );
        assert_eq!(
            board.commit(&meta, &tiles, 2),
            Err(IllegalBoardState::CellOccupied {
                at: Coordinate::new(8, 8)
            })
        );
    }

    #[test]
    fn revert_only_clears_the_move() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        place(&mut board, &ruleset, "H8", "CAT");
        let before = board.to_snapshot();

        let meta = place(&mut board, &ruleset, "7I", "bAT");
        assert_eq!(board.tile_count(), 5);
        let tiles = board.revert(&meta);
        assert_eq!(tiles.len(), 2);
        assert!(tiles[0].is_blank());
        assert_eq!(tiles[0].char(), None);
        assert_eq!(board.to_snapshot(), before);
    }

    #[test]
    fn words_through_a_cell() {
        let ruleset = Ruleset::english();
        let mut board = Board::new(&ruleset);
        place(&mut board, &ruleset, "H8", "CAT");
        place(&mut board, &ruleset, "7I", "BAT");

        assert_eq!(
            board.words_through(Coordinate::new(9, 8)),
            vec!["CAT".to_string(), "BAT".to_string()]
        );
        assert_eq!(
            board.words_through(Coordinate::new(8, 8)),
            vec!["CAT".to_string()]
        );
        assert!(board.words_through(Coordinate::new(1, 1)).is_empty());

        let meta = board
            .evaluate(&Placement::from_notation("I8", "AT").unwrap())
            .unwrap();
        assert!(meta.touches_ends);
    }
}
