//! Lava spread over tile heat.
//! This module exists to own the spread cadence and the heat transfer rule.
//! It does not decide player death; the session checks the player's tile after each pass.

use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::state::{Tile, TileStore};
use crate::types::{Coord, SessionEvent};

const VISITED_HEAT_DELTA: f64 = 1.0;
const CORRIDOR_HEAT_DELTA: f64 = 0.34;
const WALL_HEAT_DELTA: f64 = 0.034;

const ACCELERATION_BASE: f64 = 1.1;
const BASE_SPEED_DIVISOR: f64 = 50.0;

pub struct HazardSimulator {
    base_interval_ms: u64,
    /// Lead the player may hold over the lava before it accelerates.
    speed_buffer: i32,
    /// Leftmost column the lava may still touch; raised by eviction.
    floor_x: i32,
    last_spread_ms: Option<u64>,
    lethal: BTreeSet<Coord>,
    surrounded: BTreeSet<i64>,
    spread_count: u64,
}

impl HazardSimulator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            base_interval_ms: config.lava_base_interval_ms,
            speed_buffer: (config.max_game_tile_padding_left - 5).max(5),
            floor_x: -config.min_game_tile_padding_left,
            last_spread_ms: None,
            lethal: BTreeSet::new(),
            surrounded: BTreeSet::new(),
            spread_count: 0,
        }
    }

    /// Sets a tile to full heat. Returns `false` when the tile is missing or already lava.
    pub fn ignite(
        &mut self,
        store: &mut TileStore,
        coord: Coord,
        events: &mut Vec<SessionEvent>,
    ) -> bool {
        let Some(tile) = store.get_mut(coord) else {
            log::warn!("cannot ignite missing tile at {},{}", coord.x, coord.y);
            return false;
        };
        let ignited = tile.increase_heat(1.0);
        self.lethal.insert(coord);
        if ignited {
            events.push(SessionEvent::TileIgnited { coord });
        }
        ignited
    }

    pub fn furthest_lava_x(&self) -> Option<i32> {
        // Coord orders by x first.
        self.lethal.last().map(|coord| coord.x)
    }

    pub fn lava_count(&self) -> usize {
        self.lethal.len()
    }

    pub fn surrounded_count(&self) -> usize {
        self.surrounded.len()
    }

    pub fn spread_count(&self) -> u64 {
        self.spread_count
    }

    pub fn floor_x(&self) -> i32 {
        self.floor_x
    }

    /// Grows slowly with distance travelled and exponentially once the player
    /// leads the lava by more than the buffer.
    pub fn spread_speed(&self, player_x: i32) -> f64 {
        let base = (f64::from(player_x + 9) / BASE_SPEED_DIVISOR).max(1.0);
        let lead = self.furthest_lava_x().map_or(0, |lava_x| player_x - lava_x);
        let buffered = (lead - self.speed_buffer).max(0);
        base * ACCELERATION_BASE.powi(buffered)
    }

    pub fn spread_interval_ms(&self, player_x: i32) -> f64 {
        self.base_interval_ms as f64 / self.spread_speed(player_x)
    }

    /// Runs one spread pass when more than the current interval has elapsed
    /// since the previous one. The first call only starts the clock.
    pub fn advance(
        &mut self,
        store: &mut TileStore,
        player_x: i32,
        frontier_x: i32,
        now_ms: u64,
        events: &mut Vec<SessionEvent>,
    ) -> bool {
        let Some(last) = self.last_spread_ms else {
            self.last_spread_ms = Some(now_ms);
            return false;
        };
        let elapsed = now_ms.saturating_sub(last) as f64;
        if elapsed <= self.spread_interval_ms(player_x) {
            return false;
        }
        self.last_spread_ms = Some(now_ms);
        self.spread(store, frontier_x, events);
        true
    }

    /// Every tile that was lava before the pass heats its neighbors once.
    pub fn spread(&mut self, store: &mut TileStore, frontier_x: i32, events: &mut Vec<SessionEvent>) {
        let sources: Vec<Coord> = self
            .lethal
            .iter()
            .filter(|&&coord| !self.surrounded.contains(&store.key(coord)))
            .copied()
            .collect();

        for source in sources {
            let mut all_neighbors_lethal = true;
            for neighbor in source.neighbors() {
                if !self.can_reach(store, neighbor, frontier_x) {
                    continue;
                }
                if !store.contains(neighbor) {
                    store.insert(Tile::wall(neighbor));
                    all_neighbors_lethal = false;
                    continue;
                }
                let Some(tile) = store.get_mut(neighbor) else {
                    continue;
                };
                let delta = heat_delta(tile);
                if tile.increase_heat(delta) {
                    self.lethal.insert(neighbor);
                    events.push(SessionEvent::TileIgnited { coord: neighbor });
                }
                if !tile.is_lava() {
                    all_neighbors_lethal = false;
                }
            }
            if all_neighbors_lethal {
                self.surrounded.insert(store.key(source));
            }
        }

        self.spread_count += 1;
    }

    /// Drops bookkeeping for evicted columns and keeps the lava from re-creating them.
    pub fn forget_before(&mut self, store: &TileStore, x_threshold: i32) {
        self.lethal = self.lethal.split_off(&Coord { x: x_threshold, y: i32::MIN });
        self.surrounded = self.surrounded.split_off(&store.key(Coord { x: x_threshold, y: 0 }));
        self.floor_x = self.floor_x.max(x_threshold);
    }

    fn can_reach(&self, store: &TileStore, coord: Coord, frontier_x: i32) -> bool {
        coord.y > 0 && coord.y < store.world_height() && coord.x >= self.floor_x && coord.x < frontier_x
    }
}

fn heat_delta(tile: &Tile) -> f64 {
    if tile.is_visited() {
        VISITED_HEAT_DELTA
    } else if tile.is_path() {
        CORRIDOR_HEAT_DELTA
    } else {
        WALL_HEAT_DELTA
    }
}
