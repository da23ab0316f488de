//! Sparse world tile storage keyed by packed coordinates.
//! Tiles never point at each other; every relation is a lookup through the store.

use std::collections::BTreeMap;

use crate::mapgen::GeneratedChunk;
use crate::types::Coord;

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub coord: Coord,
    is_path: bool,
    letter: Option<char>,
    visit_count: u32,
    back_count: u32,
    heat: f64,
}

impl Tile {
    pub fn path(coord: Coord) -> Self {
        Self { coord, is_path: true, letter: None, visit_count: 0, back_count: 0, heat: 0.0 }
    }

    pub fn wall(coord: Coord) -> Self {
        Self { is_path: false, ..Self::path(coord) }
    }

    /// Corridor that counts as already walked and erased, used for the nursery.
    pub fn trodden_path(coord: Coord) -> Self {
        Self { visit_count: 1, back_count: 1, ..Self::path(coord) }
    }

    pub fn is_path(&self) -> bool {
        self.is_path
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    pub fn visit_count(&self) -> u32 {
        self.visit_count
    }

    pub fn back_count(&self) -> u32 {
        self.back_count
    }

    pub fn heat(&self) -> f64 {
        self.heat
    }

    pub fn is_visited(&self) -> bool {
        self.visit_count > 0
    }

    /// Walked onto and then backtracked away from as often as entered.
    pub fn is_deleted(&self) -> bool {
        self.visit_count > 0 && self.visit_count == self.back_count
    }

    pub fn is_lava(&self) -> bool {
        self.heat >= 1.0
    }

    /// Write-once. Returns `false` when a letter was already present.
    pub fn set_letter(&mut self, letter: char) -> bool {
        if self.letter.is_some() {
            return false;
        }
        self.letter = Some(letter);
        true
    }

    pub fn record_visit(&mut self) {
        self.visit_count += 1;
    }

    pub fn record_back(&mut self) {
        debug_assert!(self.back_count < self.visit_count, "backtracked off an unvisited tile");
        self.back_count += 1;
    }

    /// Adds heat, clamped to 1. Returns `true` when this call turned the tile into lava.
    pub fn increase_heat(&mut self, delta: f64) -> bool {
        debug_assert!(delta >= 0.0);
        let was_lava = self.is_lava();
        self.heat = (self.heat + delta).min(1.0);
        !was_lava && self.is_lava()
    }
}

pub struct TileStore {
    world_height: i32,
    tiles: BTreeMap<i64, Tile>,
}

impl TileStore {
    pub fn new(world_height: i32) -> Self {
        debug_assert!(world_height > 0);
        Self { world_height, tiles: BTreeMap::new() }
    }

    pub fn world_height(&self) -> i32 {
        self.world_height
    }

    pub fn in_row_range(&self, y: i32) -> bool {
        (0..self.world_height).contains(&y)
    }

    /// `x * (height + 1) + y`; bijective and x-major ordered for rows in range.
    pub fn key(&self, coord: Coord) -> i64 {
        debug_assert!(coord.y >= 0 && coord.y <= self.world_height, "row {} out of range", coord.y);
        i64::from(coord.x) * i64::from(self.world_height + 1) + i64::from(coord.y)
    }

    /// Adds corridor tiles for the chunk and walls for every other cell of its columns.
    /// Existing tiles are left untouched. Returns the number of tiles created.
    pub fn insert_chunk(&mut self, chunk: &GeneratedChunk) -> usize {
        let mut created = 0;
        for &corridor in &chunk.corridors {
            if self.in_row_range(corridor.y) && self.insert(Tile::path(corridor)) {
                created += 1;
            }
        }
        for x in chunk.x_start..chunk.x_end {
            for y in 0..self.world_height {
                if self.insert(Tile::wall(Coord { x, y })) {
                    created += 1;
                }
            }
        }
        created
    }

    /// Returns `false` and keeps the existing tile when the coordinate is taken.
    pub fn insert(&mut self, tile: Tile) -> bool {
        let key = self.key(tile.coord);
        if self.tiles.contains_key(&key) {
            return false;
        }
        self.tiles.insert(key, tile);
        true
    }

    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        if !self.in_row_range(coord.y) {
            return None;
        }
        self.tiles.get(&self.key(coord))
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        if !self.in_row_range(coord.y) {
            return None;
        }
        let key = self.key(coord);
        self.tiles.get_mut(&key)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    pub fn is_path(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Tile::is_path)
    }

    /// Existing neighbors in the order right, up, down, left.
    pub fn neighbors(&self, coord: Coord) -> Vec<&Tile> {
        coord.neighbors().into_iter().filter_map(|n| self.get(n)).collect()
    }

    pub fn path_neighbors(&self, coord: Coord) -> Vec<&Tile> {
        self.neighbors(coord).into_iter().filter(|tile| tile.is_path()).collect()
    }

    pub fn path_neighbor_coords(&self, coord: Coord) -> Vec<Coord> {
        coord.neighbors().into_iter().filter(|&n| self.is_path(n)).collect()
    }

    /// Removes every tile left of `x_threshold`. Returns the number removed.
    pub fn evict_before(&mut self, x_threshold: i32) -> usize {
        let split_key = self.key(Coord { x: x_threshold, y: 0 });
        let kept = self.tiles.split_off(&split_key);
        let evicted = self.tiles.len();
        self.tiles = kept;
        evicted
    }

    /// Tiles in key order (x-major, then y).
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
