//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from session control code.
//! It does not own replay execution.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl GameSession {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(self.config.base_seed.as_bytes());
        hasher.write_u64(self.input_count);
        hasher.write_u32(self.rendered_chunks);
        hasher.write_i32(self.current.x);
        hasher.write_i32(self.current.y);
        hasher.write_usize(self.history.len());
        for coord in &self.history {
            hasher.write_i32(coord.x);
            hasher.write_i32(coord.y);
        }
        match self.status {
            SessionStatus::Active => hasher.write_u8(0),
            SessionStatus::Dead { score } => {
                hasher.write_u8(1);
                hasher.write_i32(score);
            }
        }
        hasher.write_u64(self.hazard.spread_count());
        hasher.write_usize(self.hazard.lava_count());

        for tile in self.store.iter() {
            hasher.write_i32(tile.coord.x);
            hasher.write_i32(tile.coord.y);
            hasher.write_u8(u8::from(tile.is_path()));
            hasher.write_u32(tile.letter().map_or(0, u32::from));
            hasher.write_u32(tile.visit_count());
            hasher.write_u32(tile.back_count());
            hasher.write_u64(tile.heat().to_bits());
        }
        hasher.finish()
    }
}
