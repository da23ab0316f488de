//! Starting world construction for a new session.
//! This module exists to isolate nursery layout and first-chunk setup from runtime flow.
//! It does not own movement or lava cadence once a session has started.

use super::*;
use crate::content::Dictionary;

impl GameSession {
    pub fn new(config: GameConfig, dictionary: Dictionary) -> Result<Self, SessionError> {
        config.validate()?;

        let start = config.start_coord();
        let store = TileStore::new(config.world_height());
        let mut session = Self {
            generator: ChunkGenerator::new(&config),
            words: WordPlacer::new(&config, dictionary),
            hazard: HazardSimulator::new(&config),
            store,
            current: start,
            history: Vec::new(),
            rendered_chunks: 0,
            status: SessionStatus::Active,
            events: Vec::new(),
            last_eviction_ms: None,
            input_count: 0,
            shut_down: false,
            config,
        };

        session.lay_out_nursery();
        session.ensure_chunks_ahead();

        let Some(start_tile) = session.store.get_mut(start).filter(|tile| tile.is_path()) else {
            return Err(SessionError::MissingStartTile(start));
        };
        start_tile.record_visit();
        // The start is a word boundary like every other crossing.
        start_tile.set_letter(' ');
        session.events.push(SessionEvent::TileVisited { coord: start });
        session.events.push(SessionEvent::TileLettered { coord: start, letter: ' ' });

        session.ignite_initial_lava();

        let budget = session.config.crossings_to_pre_fill_with_words;
        session.words.render_next_words(&mut session.store, start, None, budget, &mut session.events);

        log::debug!(
            "session started at {},{} with {} chunks ahead",
            start.x,
            start.y,
            session.rendered_chunks
        );
        Ok(session)
    }

    /// Pre-walked area left of the maze: a lane into the start tile and a
    /// disc around the lava source, walls everywhere else.
    fn lay_out_nursery(&mut self) {
        let start = self.config.start_coord();
        let left = -self.config.min_game_tile_padding_left;
        let maze_origin = self.config.maze_origin_x();

        for x in left..maze_origin {
            for y in 0..self.store.world_height() {
                let coord = Coord { x, y };
                let open = y == start.y || self.in_lava_disc(coord);
                let tile = if open { Tile::trodden_path(coord) } else { Tile::wall(coord) };
                self.store.insert(tile);
            }
        }
    }

    fn in_lava_disc(&self, coord: Coord) -> bool {
        let center = Coord { x: -self.config.min_game_tile_padding_left, y: self.config.start_coord().y };
        let radius =
            i64::from(self.config.min_game_tile_padding_left - self.config.lava_start_offset);
        let dx = i64::from(coord.x - center.x);
        let dy = i64::from(coord.y - center.y);
        coord.x < 0 && dx * dx + dy * dy <= radius * radius
    }

    fn ignite_initial_lava(&mut self) {
        let x = -self.config.min_game_tile_padding_left;
        for y in 0..self.store.world_height() {
            let coord = Coord { x, y };
            if self.in_lava_disc(coord) {
                self.hazard.ignite(&mut self.store, coord, &mut self.events);
            }
        }
    }
}
