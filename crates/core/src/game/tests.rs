use super::test_support::*;
use super::*;
use crate::config::test_config;
use crate::content::Dictionary;

const START: Coord = Coord { x: 1, y: 15 };

fn count_deaths(events: &[SessionEvent]) -> usize {
    events.iter().filter(|event| matches!(event, SessionEvent::PlayerDied { .. })).count()
}

#[test]
fn new_session_stands_on_the_visited_start_tile() {
    let mut session = started_session("1337");
    assert_eq!(session.current(), START);
    assert!(session.history().is_empty());
    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.current_tile().map(Tile::visit_count), Some(1));

    // Five chunk widths ahead of column 1 need six chunks.
    assert_eq!(session.rendered_chunks(), 6);
    assert_eq!(session.frontier_x(), 193);

    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::TileVisited { coord: START }));
    assert!(events.iter().any(|event| matches!(event, SessionEvent::TileIgnited { .. })));
    assert!(session.drain_events().is_empty());
}

#[test]
fn nursery_is_walled_except_for_the_lane_and_lava_disc() {
    let session = started_session("1337");
    let store = session.store();
    for x in -20..=0 {
        for y in 0..32 {
            assert!(store.contains(Coord::new(x, y)), "nursery tile {x},{y} missing");
        }
        let lane = store.get(Coord::new(x, START.y)).expect("lane tile");
        assert!(lane.is_path() && lane.is_deleted());
        assert_eq!(lane.letter(), None);
    }
    assert!(!store.is_path(Coord::new(-1, 2)));
    assert!(store.is_path(Coord::new(-15, 20)));

    // Radius 20 - 10 around (-20, 15) covers rows 5 through 25 in the source column.
    assert_eq!(session.hazard().lava_count(), 21);
    assert_eq!(session.hazard().furthest_lava_x(), Some(-20));
}

#[test]
fn words_are_placed_ahead_of_the_start_tile() {
    let session = started_session("1337");
    let typeable = session.typeable_neighbors();
    assert!(!typeable.is_empty());
    assert!(typeable.iter().all(|tile| tile.coord.x >= 1));
}

#[test]
fn start_tile_is_a_word_separator() {
    let mut session = started_session("1337");
    assert_eq!(session.current_tile().and_then(Tile::letter), Some(' '));
    assert!(session.drain_events().contains(&SessionEvent::TileLettered { coord: START, letter: ' ' }));
}

#[test]
fn every_way_on_is_lettered_across_chunk_boundaries() {
    let mut config = test_config("boundaries");
    config.chunk_generation_distance = 1;
    let mut session = session_with(config);
    let target = session.generator.chunk_x_start(4);

    let mut steps = 0;
    while session.current().x < target && steps < 20_000 {
        if explore_step(&mut session) == MoveOutcome::Ignored {
            break;
        }
        let missing = unlettered_ways_on(&session);
        assert!(
            missing.is_empty(),
            "at {:?} with frontier {} no letter on {missing:?}",
            session.current(),
            session.frontier_x()
        );
        steps += 1;
    }
    assert!(session.current().x >= target, "stalled at {:?}", session.current());
}

#[test]
fn exploring_never_meets_an_unlettered_way_on() {
    for seed in ["1337", "explore-a", "explore-b", "explore-c", "explore-d", "explore-e"] {
        let mut session = started_session(seed);
        for _ in 0..600 {
            if explore_step(&mut session) == MoveOutcome::Ignored {
                break;
            }
            assert!(unlettered_ways_on(&session).is_empty(), "seed {seed} at {:?}", session.current());
        }
    }
}

#[test]
fn junction_neighbors_never_share_a_letter() {
    for seed in ["1337", "junction-1", "junction-2", "junction-3", "junction-4"] {
        let mut session = started_session(seed);
        for _ in 0..1500 {
            if explore_step(&mut session) == MoveOutcome::Ignored {
                break;
            }
        }
        let ambiguous = ambiguous_junctions(&session);
        assert!(ambiguous.is_empty(), "seed {seed}: ambiguous junctions {ambiguous:?}");
    }
}

#[test]
fn typing_a_neighbor_letter_moves_the_player() {
    let mut session = started_session("1337");
    session.drain_events();
    let letter = next_letter(&session).expect("start has a lettered neighbor");

    let outcome = session.apply_input(InputEvent::Char(letter));
    let MoveOutcome::Moved { to } = outcome else {
        panic!("expected a move, got {outcome:?}");
    };
    assert_eq!(session.current(), to);
    assert_eq!(session.history(), [START]);
    assert!(session.current_tile().is_some_and(Tile::is_visited));
    assert!(session.drain_events().contains(&SessionEvent::TileVisited { coord: to }));
}

#[test]
fn uppercase_input_matches_lowercase_letters() {
    let mut session = started_session("1337");
    let letter = next_letter(&session).expect("start has a lettered neighbor");
    let outcome = session.apply_input(InputEvent::Char(letter.to_ascii_uppercase()));
    assert!(matches!(outcome, MoveOutcome::Moved { .. }));
}

#[test]
fn unmatched_letter_is_rejected_without_moving() {
    let mut session = started_session("1337");
    session.drain_events();
    assert_eq!(session.apply_input(InputEvent::Char('9')), MoveOutcome::Rejected);
    assert_eq!(session.current(), START);
    assert_eq!(session.drain_events(), vec![SessionEvent::InputRejected { input: '9' }]);
}

#[test]
fn previous_tile_is_never_offered_as_a_move() {
    let mut session = started_session("1337");
    walk_forward(&mut session, 25);
    let previous = session.history().last().copied();
    assert!(previous.is_some());
    assert!(session.typeable_neighbors().iter().all(|tile| Some(tile.coord) != previous));
}

#[test]
fn backspace_returns_to_the_previous_tile_and_marks_it_deleted() {
    let mut session = started_session("1337");
    assert_eq!(walk_forward(&mut session, 1), 1);
    let left = session.current();
    session.drain_events();

    assert_eq!(session.apply_input(InputEvent::DeleteChar), MoveOutcome::Moved { to: START });
    assert!(session.history().is_empty());
    assert!(session.store().get(left).is_some_and(Tile::is_deleted));
    assert_eq!(session.drain_events(), vec![SessionEvent::TileBacktracked { coord: left }]);
}

#[test]
fn backspace_with_empty_history_is_ignored() {
    let mut session = started_session("1337");
    assert_eq!(session.apply_input(InputEvent::DeleteChar), MoveOutcome::Ignored);
    assert_eq!(session.apply_input(InputEvent::DeleteWord), MoveOutcome::Ignored);
    assert_eq!(session.current(), START);
}

#[test]
fn delete_word_stops_on_the_nearest_separator_or_the_start() {
    let mut session = started_session("1337");
    let moved = walk_forward(&mut session, 40);
    assert!(moved > 0);
    let depth_before = session.history().len();

    let outcome = session.apply_input(InputEvent::DeleteWord);
    assert!(matches!(outcome, MoveOutcome::Moved { .. }));
    assert!(session.history().len() < depth_before);

    let on_separator = session.current_tile().and_then(Tile::letter) == Some(' ');
    assert!(on_separator || session.history().is_empty());
}

#[test]
fn delete_word_skips_over_letters_between_separators() {
    let mut session = started_session("1337");
    assert!(walk_forward(&mut session, 40) > 0);
    let mut path = session.history().to_vec();
    path.push(session.current());

    session.apply_input(InputEvent::DeleteWord);
    let landed = session.history().len();
    // Every tile stepped back over, except the landing tile, holds a letter.
    for coord in &path[landed + 1..path.len() - 1] {
        let letter = session.store().get(*coord).and_then(Tile::letter);
        assert_ne!(letter, Some(' '), "passed a separator at {coord:?}");
    }
}

#[test]
fn generation_frontier_stays_ahead_of_the_player() {
    let mut session = started_session("frontier");
    walk_forward(&mut session, 300);
    let reach = session.current().x + 5 * 32;
    assert!(session.frontier_x() > reach);
    assert!(session.store().iter().all(|tile| tile.coord.x < session.frontier_x()));
}

#[test]
fn lava_kills_an_idle_player_exactly_once() {
    let mut session = started_session("1337");
    session.drain_events();
    tick_until_stopped(&mut session, 200);

    assert_eq!(session.status(), SessionStatus::Dead { score: 1 });
    let mut events = session.drain_events();
    let spreads = session.hazard().spread_count();

    for later in 0..20 {
        session.tick(1_000_000 + later * 10_000);
    }
    assert_eq!(session.apply_input(InputEvent::DeleteChar), MoveOutcome::Ignored);
    assert_eq!(session.hazard().spread_count(), spreads);
    events.extend(session.drain_events());
    assert_eq!(count_deaths(&events), 1);
    assert!(events.contains(&SessionEvent::PlayerDied { score: 1 }));
}

#[test]
fn eviction_drops_columns_far_behind_the_player() {
    let mut config = test_config("1337");
    config.max_game_tile_padding_left = 20;
    config.eviction_lag_columns = 0;
    let mut session = session_with(config);

    session.tick(0);
    session.tick(1000);
    assert!(session.store().iter().all(|tile| tile.coord.x >= -19));
    assert_eq!(session.hazard().floor_x(), -19);
    assert_eq!(session.hazard().lava_count(), 0);
}

#[test]
fn shutdown_is_idempotent_and_stops_the_session() {
    let mut session = started_session("1337");
    session.shutdown();
    session.shutdown();
    assert!(!session.is_running());
    assert_eq!(session.apply_input(InputEvent::Char('a')), MoveOutcome::Ignored);
    session.tick(0);
    session.tick(100_000);
    assert_eq!(session.hazard().spread_count(), 0);
    assert_eq!(session.status(), SessionStatus::Active);
}

#[test]
fn invalid_configuration_is_rejected_at_construction() {
    let mut config = test_config("1337");
    config.chunk_cells_per_grid = 1;
    let err = GameSession::new(config, Dictionary::builtin()).err();
    assert_eq!(err, Some(SessionError::Config(ConfigError::GridTooSmall(1))));
}

#[test]
fn snapshot_hash_is_reproducible_and_seed_sensitive() {
    let run = |seed: &str| {
        let mut session = started_session(seed);
        walk_forward(&mut session, 30);
        session.tick(0);
        session.tick(1501);
        session.snapshot_hash()
    };
    assert_eq!(run("1337"), run("1337"));
    assert_ne!(run("1337"), run("1338"));
}
