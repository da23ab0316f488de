use std::mem;

use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::hazard::HazardSimulator;
use crate::mapgen::ChunkGenerator;
use crate::state::{Tile, TileStore};
use crate::types::*;
use crate::words::WordPlacer;

mod bootstrap;
mod hash;
mod movement;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("start tile {0:?} is not a corridor")]
    MissingStartTile(Coord),
}

pub struct GameSession {
    config: GameConfig,
    generator: ChunkGenerator,
    store: TileStore,
    words: WordPlacer,
    hazard: HazardSimulator,
    current: Coord,
    history: Vec<Coord>,
    rendered_chunks: u32,
    status: SessionStatus,
    events: Vec<SessionEvent>,
    last_eviction_ms: Option<u64>,
    input_count: u64,
    shut_down: bool,
}

impl GameSession {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        !self.status.is_dead() && !self.shut_down
    }

    pub fn current(&self) -> Coord {
        self.current
    }

    pub fn current_tile(&self) -> Option<&Tile> {
        self.store.get(self.current)
    }

    pub fn history(&self) -> &[Coord] {
        &self.history
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn hazard(&self) -> &HazardSimulator {
        &self.hazard
    }

    pub fn rendered_chunks(&self) -> u32 {
        self.rendered_chunks
    }

    /// First column that has not been generated yet.
    pub fn frontier_x(&self) -> i32 {
        self.generator.chunk_x_start(self.rendered_chunks)
    }

    pub fn input_count(&self) -> u64 {
        self.input_count
    }

    /// Events accumulated since the previous drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        mem::take(&mut self.events)
    }

    /// Neighbors the next keystroke can select, for highlighting.
    pub fn typeable_neighbors(&self) -> Vec<&Tile> {
        let previous = self.history.last().copied();
        self.store
            .path_neighbors(self.current)
            .into_iter()
            .filter(|tile| tile.letter().is_some() && Some(tile.coord) != previous)
            .collect()
    }

    pub fn apply_input(&mut self, input: InputEvent) -> MoveOutcome {
        if !self.is_running() {
            return MoveOutcome::Ignored;
        }
        self.input_count += 1;
        match input {
            InputEvent::Char(letter) => self.move_forward(letter.to_ascii_lowercase()),
            InputEvent::DeleteChar => self.move_backward(),
            InputEvent::DeleteWord => self.move_backward_word(),
        }
    }

    /// Host clock callback. Spreads lava when due and evicts far-behind columns.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.is_running() {
            return;
        }

        let frontier_x = self.frontier_x();
        let spread = self.hazard.advance(
            &mut self.store,
            self.current.x,
            frontier_x,
            now_ms,
            &mut self.events,
        );
        if spread {
            self.check_player_death();
        }

        self.evict_if_due(now_ms);
    }

    /// Stops all further simulation. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        log::debug!("session shut down at column {}", self.current.x);
    }

    fn ensure_chunks_ahead(&mut self) {
        let reach = self.current.x
            + self.config.chunk_generation_distance as i32 * self.generator.chunk_pixel_width();
        while self.frontier_x() <= reach {
            let chunk = self.generator.generate(self.rendered_chunks);
            let created = self.store.insert_chunk(&chunk);
            log::debug!(
                "generated chunk {} covering columns {}..{} ({created} tiles)",
                chunk.index,
                chunk.x_start,
                chunk.x_end
            );
            self.rendered_chunks += 1;
        }
    }

    fn evict_if_due(&mut self, now_ms: u64) {
        let Some(last) = self.last_eviction_ms else {
            self.last_eviction_ms = Some(now_ms);
            return;
        };
        if now_ms.saturating_sub(last) < self.config.eviction_interval_ms {
            return;
        }
        self.last_eviction_ms = Some(now_ms);

        let threshold = self.current.x
            - self.config.max_game_tile_padding_left
            - self.config.eviction_lag_columns;
        debug_assert!(threshold < self.current.x, "eviction must stay behind the player");
        let removed = self.store.evict_before(threshold);
        self.hazard.forget_before(&self.store, threshold);
        if removed > 0 {
            log::debug!("evicted {removed} tiles left of column {threshold}");
        }
    }

    fn check_player_death(&mut self) {
        if self.status.is_dead() {
            return;
        }
        if self.store.get(self.current).is_some_and(Tile::is_lava) {
            let score = self.current.x;
            self.status = SessionStatus::Dead { score };
            self.events.push(SessionEvent::PlayerDied { score });
            log::info!("player died at column {score}");
        }
    }
}
