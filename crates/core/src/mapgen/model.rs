//! Public data model for generated maze chunks.

use crate::types::Coord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedChunk {
    pub index: u32,
    /// First world column owned by the chunk.
    pub x_start: i32,
    /// One past the last world column owned by the chunk.
    pub x_end: i32,
    /// Corridor tiles in world space, column-major.
    pub corridors: Vec<Coord>,
}

impl GeneratedChunk {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(12 + self.corridors.len() * 8);
        bytes.extend(self.index.to_le_bytes());
        bytes.extend(self.x_start.to_le_bytes());
        bytes.extend(self.x_end.to_le_bytes());
        for corridor in &self.corridors {
            bytes.extend(corridor.x.to_le_bytes());
            bytes.extend(corridor.y.to_le_bytes());
        }
        bytes
    }

    pub fn contains_column(&self, x: i32) -> bool {
        (self.x_start..self.x_end).contains(&x)
    }
}
