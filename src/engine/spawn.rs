use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::Rng;

use super::grid::{Grid, Position};
use super::tile::{Tile, TileIds, Value};

const NEW_TILE_CHOICES: [Value; 2] = [2, 4];
const NEW_TILE_WEIGHTS: [u8; 2] = [9, 1];

/// Spawner places new tiles on the board: uniformly over the empty cells, a 2 nine times out of
/// ten and a 4 otherwise.
#[derive(Clone, Debug)]
pub(crate) struct Spawner {
    weighted_index: WeightedIndex<u8>,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            weighted_index: WeightedIndex::new(NEW_TILE_WEIGHTS)
                .expect("NEW_TILE_WEIGHTS should never be empty"),
        }
    }
}

impl Spawner {
    pub(crate) fn value<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        NEW_TILE_CHOICES[self.weighted_index.sample(rng)]
    }

    /// Add one random tile and return where it went. A full board is left untouched.
    pub(crate) fn add_random_tile<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        ids: &mut TileIds,
    ) -> Option<Position> {
        let available = grid.available_cells();
        if available.is_empty() {
            return None;
        }
        let pos = available[rng.gen_range(0..available.len())];
        let value = self.value(rng);
        let tile = Tile::new(ids.next_id(), pos, value);
        log::trace!("spawning {0} with value {1} at {2}", tile.id, value, pos);
        grid.insert_tile(tile);
        Some(pos)
    }
}
