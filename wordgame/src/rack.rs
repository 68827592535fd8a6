use serde::{Deserialize, Serialize};

use crate::{Tile, TilePool, BLANK};

/// The number of tiles a full rack holds.
pub const RACK_SIZE: usize = 7;

/// The tiles a player holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<Tile>,
}

/// Returned when a rack cannot supply the requested tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingTiles {
    /// The requests that could not be served, in request order.
    pub missing: Vec<char>,
}

impl std::error::Error for MissingTiles {}

impl std::fmt::Display for MissingTiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let missing: String = self.missing.iter().collect();
        write!(f, "The rack lacks the tiles {}", missing)
    }
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= RACK_SIZE
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn blank_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_blank()).count()
    }

    /// How many letter tiles (not blanks) show `letter`.
    pub fn letter_count(&self, letter: char) -> usize {
        self.tiles
            .iter()
            .filter(|tile| !tile.is_blank() && tile.matches(letter))
            .count()
    }

    /// The total value of the tiles.
    pub fn points(&self) -> u32 {
        self.tiles.iter().map(Tile::points).sum()
    }

    pub fn add(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles.into_iter().map(Tile::cleared));
    }

    /// The requests in `wanted` this rack could not serve, see
    /// [`remove_matching()`](Self::remove_matching).
    pub fn missing(&self, wanted: &[char]) -> Vec<char> {
        self.assign(wanted, true)
            .iter()
            .zip(wanted)
            .filter(|(slot, _)| slot.is_none())
            .map(|(_, &c)| c)
            .collect()
    }

    /// Takes out one tile per request, returned in request order.
    ///
    /// A request is a letter or [`BLANK`]. Letters are served by letter
    /// tiles first, and by blanks only when those run out. Nothing is
    /// removed if a request cannot be served.
    pub fn remove_matching(&mut self, wanted: &[char]) -> Result<Vec<Tile>, MissingTiles> {
        self.remove_assigned(wanted, true)
    }

    /// Like [`remove_matching()`](Self::remove_matching), but letters are
    /// only served by letter tiles. Used for exchanges.
    pub fn remove_exact(&mut self, wanted: &[char]) -> Result<Vec<Tile>, MissingTiles> {
        self.remove_assigned(wanted, false)
    }

    fn remove_assigned(
        &mut self,
        wanted: &[char],
        blank_fallback: bool,
    ) -> Result<Vec<Tile>, MissingTiles> {
        let slots = self.assign(wanted, blank_fallback);
        let missing: Vec<char> = slots
            .iter()
            .zip(wanted)
            .filter(|(slot, _)| slot.is_none())
            .map(|(_, &c)| c)
            .collect();
        if !missing.is_empty() {
            return Err(MissingTiles { missing });
        }

        let picked: Vec<Tile> = slots.iter().flatten().map(|&i| self.tiles[i]).collect();
        let mut taken = vec![false; self.tiles.len()];
        for &i in slots.iter().flatten() {
            taken[i] = true;
        }
        let mut i = 0;
        self.tiles.retain(|_| {
            let keep = !taken[i];
            i += 1;
            keep
        });
        Ok(picked)
    }

    /// Takes out exactly the given tiles, e.g. when a move is taken back.
    /// Returns `false` and changes nothing if one of them is not on the rack.
    pub fn remove_tiles(&mut self, tiles: &[Tile]) -> bool {
        let mut remaining = self.tiles.clone();
        for tile in tiles {
            match remaining.iter().position(|t| t.id == tile.id) {
                Some(pos) => {
                    remaining.remove(pos);
                }
                None => return false,
            }
        }
        self.tiles = remaining;
        true
    }

    /// Draws from the pool until the rack is full or the pool is empty.
    /// Returns the drawn tiles in draw order.
    pub fn refill(&mut self, pool: &mut TilePool) -> Vec<Tile> {
        let mut drawn = Vec::new();
        while !self.is_full() {
            match pool.draw() {
                Some(tile) => {
                    self.tiles.push(tile);
                    drawn.push(tile);
                }
                None => break,
            }
        }
        drawn
    }

    // Finds a rack index for each request, without taking one twice.
    fn assign(&self, wanted: &[char], blank_fallback: bool) -> Vec<Option<usize>> {
        let mut used = vec![false; self.tiles.len()];
        let mut slots = vec![None; wanted.len()];

        let take = |used: &mut Vec<bool>, pred: &dyn Fn(&Tile) -> bool| {
            let pos = (0..self.tiles.len()).find(|&i| !used[i] && pred(&self.tiles[i]))?;
            used[pos] = true;
            Some(pos)
        };

        // Exact letters, then explicit blanks, then blanks as fallback
        for (slot, &c) in slots.iter_mut().zip(wanted) {
            if c != BLANK {
                *slot = take(&mut used, &|tile: &Tile| !tile.is_blank() && tile.matches(c));
            }
        }
        for (slot, &c) in slots.iter_mut().zip(wanted) {
            if c == BLANK {
                *slot = take(&mut used, &|tile: &Tile| tile.is_blank());
            }
        }
        if !blank_fallback {
            return slots;
        }
        for (slot, &c) in slots.iter_mut().zip(wanted) {
            if c != BLANK && slot.is_none() {
                *slot = take(&mut used, &|tile: &Tile| tile.is_blank());
            }
        }
        slots
    }
}

impl std::fmt::Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for tile in &self.tiles {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}
