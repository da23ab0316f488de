//! Shared test fixtures for the crate's unit test suites.
//! This module exists to avoid repeating hand-drawn board setup across many tests.
//! It does not own production gameplay logic.

use crate::state::{Tile, TileStore};
use crate::types::Coord;

/// Builds a store from rows of `#` (wall) and any other character (corridor).
/// Row `i` of the drawing is world row `y = i`; column `j` is `x = j`.
pub(crate) fn store_from_ascii(rows: &[&str]) -> TileStore {
    let mut store = TileStore::new(rows.len() as i32);
    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.chars().enumerate() {
            let coord = Coord::new(x as i32, y as i32);
            let tile = if cell == '#' { Tile::wall(coord) } else { Tile::path(coord) };
            store.insert(tile);
        }
    }
    store
}

/// Letters written on `coords`, with `_` for unlettered or missing tiles.
pub(crate) fn letters_along(store: &TileStore, coords: &[Coord]) -> String {
    coords.iter().map(|&c| store.get(c).and_then(Tile::letter).unwrap_or('_')).collect()
}
