use crate::{Board, Bonus, Coordinate};

fn bonus_marker(bonus: Bonus) -> char {
    match bonus {
        Bonus::TripleWord => '#',
        Bonus::DoubleWord => '*',
        Bonus::TripleLetter => '^',
        Bonus::DoubleLetter => '+',
        Bonus::Plain | Bonus::Border => '·',
    }
}

/// Draws the board with column letters and row numbers.
///
/// Tiles show their letter, blanks in lower case. Empty cells show their
/// bonus: `#` triple word, `*` double word, `^` triple letter, `+` double letter.
pub fn visualize_board(board: &Board) -> String {
    let size = board.size();

    let mut result = String::from("    ");
    for x in 1..=size {
        let column = Coordinate::new(x as u8, 1).column_letter().unwrap_or('?');
        result += &format!(" {}", column);
    }
    result += "\n   ╭";
    for _ in 1..=size {
        result += "──";
    }
    result += "─╮\n";

    for y in 1..=size {
        result += &format!("{:>2} │", y);
        for x in 1..=size {
            let at = Coordinate::new(x as u8, y as u8);
            let symbol = match board.get(at) {
                Some(occupant) => occupant.tile.to_string(),
                None => bonus_marker(board.bonus(at)).to_string(),
            };
            result += &format!(" {}", symbol);
        }
        result += " │\n";
    }

    result += "   ╰";
    for _ in 1..=size {
        result += "──";
    }
    result += "─╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LetterSpec, Placement, Ruleset, Tile, TileId};

    #[test]
    fn small_board() {
        let ruleset = Ruleset::new(
            vec![LetterSpec {
                letter: 'A',
                count: 9,
                points: 1,
            }],
            1,
            3,
        )
        .unwrap();
        let mut board = Board::new(&ruleset);
        let meta = board
            .evaluate(&Placement::from_notation("A2", "Aa").unwrap())
            .unwrap();
        board
            .commit(
                &meta,
                &[Tile::letter(TileId(0), 'A', 1), Tile::blank(TileId(1))],
                0,
            )
            .unwrap();

        let expected = "     A B C\n   ╭───────╮\n 1 │ · · · │\n 2 │ A a · │\n 3 │ · · · │\n   ╰───────╯";
        assert_eq!(visualize_board(&board), expected);
    }
}
