//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating session setup and scripted walks across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::config::test_config;
use crate::content::Dictionary;

pub(super) fn started_session(seed: &str) -> GameSession {
    GameSession::new(test_config(seed), Dictionary::builtin()).expect("test config is valid")
}

pub(super) fn session_with(config: GameConfig) -> GameSession {
    GameSession::new(config, Dictionary::builtin()).expect("test config is valid")
}

/// Letter of the first neighbor the player can type into, preferring unvisited tiles.
pub(super) fn next_letter(session: &GameSession) -> Option<char> {
    let neighbors = session.typeable_neighbors();
    neighbors
        .iter()
        .find(|tile| !tile.is_visited())
        .or_else(|| neighbors.first())
        .and_then(|tile| tile.letter())
}

/// Types up to `steps` letters chosen by `next_letter`. Returns the number of moves made.
pub(super) fn walk_forward(session: &mut GameSession, steps: usize) -> usize {
    let mut moved = 0;
    for _ in 0..steps {
        let Some(letter) = next_letter(session) else {
            break;
        };
        match session.apply_input(InputEvent::Char(letter)) {
            MoveOutcome::Moved { .. } => moved += 1,
            _ => break,
        }
    }
    moved
}

/// Ticks at a pace just above the base lava interval until the session stops or `max_ticks` pass.
pub(super) fn tick_until_stopped(session: &mut GameSession, max_ticks: u64) -> u64 {
    let step = session.config().lava_base_interval_ms + 1;
    let mut ticks = 0;
    while session.is_running() && ticks < max_ticks {
        session.tick(ticks * step);
        ticks += 1;
    }
    ticks
}

/// One step of a depth-first exploration: the unvisited offered tile furthest
/// right, or back to the previous separator when none is left.
pub(super) fn explore_step(session: &mut GameSession) -> MoveOutcome {
    let choice = session
        .typeable_neighbors()
        .into_iter()
        .filter(|tile| !tile.is_visited())
        .max_by_key(|tile| tile.coord.x)
        .and_then(Tile::letter);
    match choice {
        Some(letter) => session.apply_input(InputEvent::Char(letter)),
        None => session.apply_input(InputEvent::DeleteWord),
    }
}

/// Maze corridors next to the player, other than the one just left, that carry no letter.
pub(super) fn unlettered_ways_on(session: &GameSession) -> Vec<Coord> {
    let previous = session.history().last().copied();
    let origin = session.config().maze_origin_x();
    session
        .store()
        .path_neighbor_coords(session.current())
        .into_iter()
        .filter(|&n| n.x >= origin && Some(n) != previous)
        .filter(|&n| session.store().get(n).is_some_and(|tile| tile.letter().is_none()))
        .collect()
}

/// Junctions whose lettered maze neighbors repeat a letter.
pub(super) fn ambiguous_junctions(session: &GameSession) -> Vec<Coord> {
    let store = session.store();
    let origin = session.config().maze_origin_x();
    store
        .iter()
        .filter(|tile| tile.is_path() && tile.coord.x >= origin)
        .filter(|tile| store.path_neighbor_coords(tile.coord).len() > 2)
        .filter(|tile| {
            let mut letters: Vec<char> = store
                .path_neighbors(tile.coord)
                .iter()
                .filter(|n| n.coord.x >= origin)
                .filter_map(|n| n.letter())
                .collect();
            let count = letters.len();
            letters.sort_unstable();
            letters.dedup();
            letters.len() != count
        })
        .map(|tile| tile.coord)
        .collect()
}
