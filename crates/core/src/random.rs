//! Deterministic seed derivation and unit-interval random streams.
//! This module exists so every consumer of randomness draws from a stream keyed by
//! the run seed plus a purpose suffix. It does not decide what the numbers are used for.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use xxhash_rust::xxh3::xxh3_64;

/// Source of uniformly distributed floats in `[0, 1)`.
pub trait UnitRandom {
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}

pub struct RandomStream {
    rng: ChaCha8Rng,
}

impl RandomStream {
    /// Same `(base_seed, suffix)` always yields the same sequence.
    pub fn derive(base_seed: &str, suffix: &str) -> Self {
        let seed = derive_stream_seed(base_seed, suffix);
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl UnitRandom for RandomStream {
    fn next_unit(&mut self) -> f64 {
        // 53 high bits give every representable multiple of 2^-53 in [0, 1).
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }
}

pub fn chunk_maze_suffix(chunk_index: u32) -> String {
    format!("GridChunk:{chunk_index}")
}

pub fn chunk_wall_break_suffix(chunk_index: u32) -> String {
    format!("GridChunk:{chunk_index}:WallBreak")
}

pub const WORDS_SUFFIX: &str = "Words";

fn derive_stream_seed(base_seed: &str, suffix: &str) -> u64 {
    let mut material = Vec::with_capacity(base_seed.len() + suffix.len());
    material.extend_from_slice(base_seed.as_bytes());
    material.extend_from_slice(suffix.as_bytes());
    xxh3_64(&material)
}

/// Replays a fixed list of values, cycling when exhausted.
#[cfg(test)]
pub(crate) struct FixedSequence {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl FixedSequence {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty());
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl UnitRandom for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
