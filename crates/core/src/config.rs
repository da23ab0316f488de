//! Caller-supplied game configuration and its construction-time validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Coord;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub base_seed: String,

    // Maze generation
    pub chunk_cells_per_grid: usize,
    pub dead_end_wall_break_ratio: f64,
    pub chunk_connecting_wall_break_ratio: f64,
    /// Number of chunks kept generated ahead of the player.
    pub chunk_generation_distance: usize,

    // Word placement
    pub crossings_to_pre_fill_with_words: usize,
    pub max_word_length_to_choose_in_exact_length_match_case: usize,

    // Nursery, camera window and lava
    pub min_game_tile_padding_left: i32,
    pub max_game_tile_padding_left: i32,
    pub lava_start_offset: i32,
    pub lava_base_interval_ms: u64,

    // Tile eviction
    pub eviction_lag_columns: i32,
    pub eviction_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("base seed must not be empty")]
    EmptySeed,
    #[error("chunk_cells_per_grid must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("{name} must be in (0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: f64 },
    #[error("{name} must be at least {min}, got {value}")]
    TooSmall { name: &'static str, min: i64, value: i64 },
    #[error(
        "lava_start_offset ({offset}) must be non-negative and smaller than min_game_tile_padding_left ({padding})"
    )]
    LavaOffset { offset: i32, padding: i32 },
    #[error("max_game_tile_padding_left ({max}) must not be smaller than min_game_tile_padding_left ({min})")]
    PaddingOrder { min: i32, max: i32 },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_seed.is_empty() {
            return Err(ConfigError::EmptySeed);
        }
        if self.chunk_cells_per_grid < 2 {
            return Err(ConfigError::GridTooSmall(self.chunk_cells_per_grid));
        }
        check_ratio("dead_end_wall_break_ratio", self.dead_end_wall_break_ratio)?;
        check_ratio("chunk_connecting_wall_break_ratio", self.chunk_connecting_wall_break_ratio)?;
        check_at_least("chunk_generation_distance", self.chunk_generation_distance as i64, 1)?;
        check_at_least(
            "crossings_to_pre_fill_with_words",
            self.crossings_to_pre_fill_with_words as i64,
            1,
        )?;
        check_at_least(
            "max_word_length_to_choose_in_exact_length_match_case",
            self.max_word_length_to_choose_in_exact_length_match_case as i64,
            1,
        )?;
        if self.lava_start_offset < 0 || self.lava_start_offset >= self.min_game_tile_padding_left
        {
            return Err(ConfigError::LavaOffset {
                offset: self.lava_start_offset,
                padding: self.min_game_tile_padding_left,
            });
        }
        if self.max_game_tile_padding_left < self.min_game_tile_padding_left {
            return Err(ConfigError::PaddingOrder {
                min: self.min_game_tile_padding_left,
                max: self.max_game_tile_padding_left,
            });
        }
        check_at_least("lava_base_interval_ms", self.lava_base_interval_ms as i64, 1)?;
        check_at_least("eviction_lag_columns", i64::from(self.eviction_lag_columns), 0)?;
        check_at_least("eviction_interval_ms", self.eviction_interval_ms as i64, 1)?;
        Ok(())
    }

    /// Rows in the world grid; row 0 is the border wall above the maze.
    pub fn world_height(&self) -> i32 {
        (self.chunk_cells_per_grid * 2) as i32
    }

    /// Columns covered by one generated chunk.
    pub fn chunk_pixel_width(&self) -> i32 {
        (self.chunk_cells_per_grid * 2) as i32
    }

    /// First world column belonging to the maze; everything left of it is nursery.
    pub fn maze_origin_x(&self) -> i32 {
        1
    }

    pub fn start_coord(&self) -> Coord {
        let middle_cell = ((self.chunk_cells_per_grid - 1) / 2) as i32;
        Coord { x: self.maze_origin_x(), y: 2 * middle_cell + 1 }
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { name, value })
    }
}

fn check_at_least(name: &'static str, value: i64, min: i64) -> Result<(), ConfigError> {
    if value < min { Err(ConfigError::TooSmall { name, min, value }) } else { Ok(()) }
}

#[cfg(test)]
pub(crate) fn test_config(seed: &str) -> GameConfig {
    GameConfig {
        base_seed: seed.to_string(),
        chunk_cells_per_grid: 16,
        dead_end_wall_break_ratio: 0.25,
        chunk_connecting_wall_break_ratio: 0.25,
        chunk_generation_distance: 5,
        crossings_to_pre_fill_with_words: 3,
        max_word_length_to_choose_in_exact_length_match_case: 6,
        min_game_tile_padding_left: 20,
        max_game_tile_padding_left: 40,
        lava_start_offset: 10,
        lava_base_interval_ms: 1500,
        eviction_lag_columns: 200,
        eviction_interval_ms: 1000,
    }
}
