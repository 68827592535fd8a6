use crate::{Board, Coordinate, Direction, Placement, Ruleset, Tile, TileId};

fn arbitrary_placement(g: &mut quickcheck::Gen, size: u8) -> Placement {
    use quickcheck::Arbitrary;

    let x = u8::arbitrary(g) % size + 1;
    let y = u8::arbitrary(g) % size + 1;
    let direction = *g
        .choose(&[Direction::Horizontal, Direction::Vertical])
        .unwrap();
    let len = usize::arbitrary(g) % 8 + 1;
    // A few frequent letters, so that words overlap now and then
    let word: String = (0..len)
        .map(|_| {
            let c = *g.choose(&['A', 'E', 'S', 'T', 'R', 'Q']).unwrap();
            if u8::arbitrary(g) % 8 == 0 {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect();
    Placement::new(Coordinate::new(x, y), direction, &word)
}

/// An English board with some tiles on it, and a placement to try.
/// The placement is not necessarily valid.
#[derive(Clone, Debug)]
pub struct BoardWithPlacement {
    pub board: Board,
    pub placement: Placement,
}

impl quickcheck::Arbitrary for BoardWithPlacement {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let ruleset = Ruleset::english();
        let size = ruleset.board_size() as u8;
        let mut board = Board::new(&ruleset);
        let mut next_id = 0;

        for move_nr in 0..(usize::arbitrary(g) % 6) {
            let placement = arbitrary_placement(g, size);
            let Ok(meta) = board.evaluate(&placement) else {
                continue;
            };
            let tiles: Vec<Tile> = meta
                .filled
                .iter()
                .map(|cell| {
                    next_id += 1;
                    if cell.blank {
                        Tile::blank(TileId(next_id))
                    } else {
                        let points = ruleset.points(cell.letter).unwrap();
                        Tile::letter(TileId(next_id), cell.letter, points)
                    }
                })
                .collect();
            board.commit(&meta, &tiles, move_nr as u32).unwrap();
        }

        BoardWithPlacement {
            board,
            placement: arbitrary_placement(g, size),
        }
    }
}
