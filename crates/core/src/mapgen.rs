//! Infinite maze generation, one fixed-width chunk at a time.

pub mod model;

mod generator;
mod grid;

pub use generator::ChunkGenerator;
pub use model::GeneratedChunk;

use crate::config::GameConfig;

pub fn generate_chunk(config: &GameConfig, chunk_index: u32) -> GeneratedChunk {
    ChunkGenerator::new(config).generate(chunk_index)
}
