use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{Ruleset, Tile, TileId};

/// The face-down tiles that have not been drawn yet.
///
/// Drawing takes from the end, so the order of the tiles is the draw order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePool {
    tiles: Vec<Tile>,
}

impl TilePool {
    /// Creates all tiles of the ruleset with fresh ids, in random order.
    pub fn filled(ruleset: &Ruleset, rng: &mut StdRng) -> Self {
        let mut tiles = Vec::with_capacity(ruleset.tile_count());
        let mut next_id = 0;
        for spec in ruleset.letter_distribution() {
            for _ in 0..spec.count {
                tiles.push(Tile::letter(TileId(next_id), spec.letter, spec.points));
                next_id += 1;
            }
        }
        for _ in 0..ruleset.blank_count() {
            tiles.push(Tile::blank(TileId(next_id)));
            next_id += 1;
        }
        tiles.shuffle(rng);
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Mixes tiles back in, e.g. after an exchange. Blanks lose their letter.
    pub fn return_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>, rng: &mut StdRng) {
        self.tiles.extend(tiles.into_iter().map(Tile::cleared));
        self.tiles.shuffle(rng);
    }

    /// Puts drawn tiles back on top, so that they will be drawn again in the
    /// same order. `drawn` is in the order the tiles were drawn.
    pub fn undraw(&mut self, drawn: &[Tile]) {
        self.tiles.extend(drawn.iter().rev().map(|tile| tile.cleared()));
    }
}
