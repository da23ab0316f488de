//! Lazy word placement along maze corridors.
//! This module exists to letter every branch ahead of the player so that each
//! keystroke selects exactly one neighbor. It does not move the player.

use crate::config::GameConfig;
use crate::content::Dictionary;
use crate::random::{RandomStream, UnitRandom, WORDS_SUFFIX};
use crate::state::TileStore;
use crate::types::{Coord, SessionEvent};

const CHARSET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Corridor run from a junction (exclusive) to the next junction or dead end (inclusive).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub tiles: Vec<Coord>,
    pub ends_in_dead_end: bool,
}

impl Branch {
    pub fn terminal(&self) -> Coord {
        self.tiles[self.tiles.len() - 1]
    }

    /// Letters to choose; a junction terminal is reserved for the separating space.
    pub fn letter_count(&self) -> usize {
        if self.ends_in_dead_end { self.tiles.len() } else { self.tiles.len() - 1 }
    }
}

pub struct WordPlacer<R = RandomStream> {
    dictionary: Dictionary,
    random: R,
    crossings_to_pre_fill: usize,
    max_exact_length: usize,
    maze_origin_x: i32,
}

impl WordPlacer<RandomStream> {
    pub fn new(config: &GameConfig, dictionary: Dictionary) -> Self {
        let random = RandomStream::derive(&config.base_seed, WORDS_SUFFIX);
        Self::with_random(config, dictionary, random)
    }
}

impl<R: UnitRandom> WordPlacer<R> {
    pub fn with_random(config: &GameConfig, dictionary: Dictionary, random: R) -> Self {
        Self {
            dictionary,
            random,
            crossings_to_pre_fill: config.crossings_to_pre_fill_with_words,
            max_exact_length: config.max_word_length_to_choose_in_exact_length_match_case,
            maze_origin_x: config.maze_origin_x(),
        }
    }

    /// Fills the branches ahead when `current` is a junction, or when a corridor
    /// continues into tiles generated after the junction behind was lettered.
    pub fn render_next_words_if_necessary(
        &mut self,
        store: &mut TileStore,
        current: Coord,
        coming_from: Option<Coord>,
        events: &mut Vec<SessionEvent>,
    ) {
        let at_junction = store.path_neighbor_coords(current).len() > 2;
        let unlettered_ahead = self
            .maze_path_neighbors(store, current)
            .into_iter()
            .filter(|&n| Some(n) != coming_from)
            .any(|n| store.get(n).is_some_and(|tile| tile.letter().is_none()));
        if !at_junction && !unlettered_ahead {
            return;
        }
        self.render_next_words(store, current, coming_from, self.crossings_to_pre_fill, events);
    }

    pub fn render_next_words(
        &mut self,
        store: &mut TileStore,
        crossing: Coord,
        coming_from: Option<Coord>,
        crossings_to_pass: usize,
        events: &mut Vec<SessionEvent>,
    ) {
        for branch in self.outgoing_branches(store, crossing, coming_from) {
            if is_writable(store, &branch) {
                let word = self.choose_letters(store, crossing, &branch);
                write_word(store, &branch, &word, events);
            }

            if !branch.ends_in_dead_end && crossings_to_pass > 1 {
                let before_terminal =
                    branch.tiles.len().checked_sub(2).map_or(crossing, |i| branch.tiles[i]);
                self.render_next_words(
                    store,
                    branch.terminal(),
                    Some(before_terminal),
                    crossings_to_pass - 1,
                    events,
                );
            }
        }
    }

    pub fn outgoing_branches(
        &self,
        store: &TileStore,
        crossing: Coord,
        coming_from: Option<Coord>,
    ) -> Vec<Branch> {
        self.maze_path_neighbors(store, crossing)
            .into_iter()
            .filter(|&first| Some(first) != coming_from)
            .map(|first| self.walk_branch(store, crossing, first))
            .collect()
    }

    fn maze_path_neighbors(&self, store: &TileStore, coord: Coord) -> Vec<Coord> {
        store.path_neighbor_coords(coord).into_iter().filter(|n| n.x >= self.maze_origin_x).collect()
    }

    fn walk_branch(&self, store: &TileStore, crossing: Coord, first: Coord) -> Branch {
        let mut tiles = Vec::new();
        let mut previous = crossing;
        let mut current = first;
        loop {
            tiles.push(current);
            if current == crossing {
                return Branch { tiles, ends_in_dead_end: false };
            }
            let onward: Vec<Coord> = self
                .maze_path_neighbors(store, current)
                .into_iter()
                .filter(|&n| n != previous)
                .collect();
            match onward.as_slice() {
                [next] => {
                    previous = current;
                    current = *next;
                }
                // A corridor running into the ungenerated column continues in the next chunk.
                [] => {
                    let [right, ..] = current.neighbors();
                    let ends_in_dead_end = store.contains(right);
                    return Branch { tiles, ends_in_dead_end };
                }
                _ => return Branch { tiles, ends_in_dead_end: false },
            }
        }
    }

    fn choose_letters(&mut self, store: &TileStore, crossing: Coord, branch: &Branch) -> String {
        let blocked_first = neighbor_letters(store, crossing);
        let blocked_last = neighbor_letters(store, branch.terminal());
        let length = branch.letter_count();
        // Both ends of a loop touch the crossing, so they must differ from each other too.
        let closes_loop = branch.terminal() == crossing;

        let mut chooser = WordChooser {
            dictionary: &self.dictionary,
            random: &mut self.random,
            max_exact_length: self.max_exact_length,
        };
        let mut word = chooser
            .words_with_constraints(length, &blocked_first, &blocked_last)
            .filter(|word| !closes_loop || word.chars().next() != word.chars().last())
            .unwrap_or_else(|| {
                chooser.random_string(&blocked_first, &blocked_last, length, closes_loop)
            });

        if !branch.ends_in_dead_end {
            word.push(' ');
        }
        word
    }
}

/// Picks dictionary words and random fallbacks from one shared stream.
struct WordChooser<'a, R> {
    dictionary: &'a Dictionary,
    random: &'a mut R,
    max_exact_length: usize,
}

impl<R: UnitRandom> WordChooser<'_, R> {
    /// A single word or space-separated words of exactly `length` characters.
    fn words_with_constraints(
        &mut self,
        length: usize,
        blocked_first: &[char],
        blocked_last: &[char],
    ) -> Option<String> {
        if length == 0 {
            return Some(String::new());
        }
        if length == 1 {
            return Some(self.random_string(blocked_first, blocked_last, 1, false));
        }

        let dictionary = self.dictionary;
        if dictionary.has_length(length) {
            let too_short_to_split = length <= self.max_exact_length;
            let keep_whole = self.decides_against_split(length);
            if too_short_to_split || keep_whole {
                let candidates = dictionary.constrained_words(length, blocked_first, blocked_last);
                if !candidates.is_empty() {
                    let chosen = candidates[self.random.pick_index(candidates.len())];
                    return Some(chosen.to_string());
                }
            }
        }

        let mut first_word_lengths: Vec<usize> = dictionary
            .lengths()
            .filter(|&len| len + 1 < length)
            .filter(|&len| !dictionary.constrained_words(len, blocked_first, &[]).is_empty())
            .collect();

        while !first_word_lengths.is_empty() {
            let first_length = first_word_lengths.remove(self.random.pick_index(first_word_lengths.len()));
            let candidates = dictionary.constrained_words(first_length, blocked_first, &[]);
            let first_word = candidates[self.random.pick_index(candidates.len())];

            if let Some(rest) =
                self.words_with_constraints(length - first_length - 1, &[], blocked_last)
            {
                return Some(format!("{first_word} {rest}"));
            }
        }

        None
    }

    /// Long branches are kept whole with a probability that shrinks as they grow.
    fn decides_against_split(&mut self, length: usize) -> bool {
        let roll = (self.random.next_unit() * length as f64).floor() as usize;
        roll <= (self.max_exact_length + 1) / 2
    }

    /// Lowercase string whose first character avoids `blocked_first` and whose
    /// last character avoids `blocked_last`. A single character avoids both.
    fn random_string(
        &mut self,
        blocked_first: &[char],
        blocked_last: &[char],
        length: usize,
        last_differs_from_first: bool,
    ) -> String {
        if length == 0 {
            return String::new();
        }
        if length == 1 {
            let blocked: Vec<char> = blocked_first.iter().chain(blocked_last).copied().collect();
            return self.pick_char(&blocked).to_string();
        }

        let first = self.pick_char(blocked_first);
        let mut result = String::with_capacity(length);
        result.push(first);
        for _ in 2..length {
            result.push(CHARSET[self.random.pick_index(CHARSET.len())]);
        }
        let mut blocked = blocked_last.to_vec();
        if last_differs_from_first {
            blocked.push(first);
        }
        result.push(self.pick_char(&blocked));
        result
    }

    /// Any character when every one is blocked.
    fn pick_char(&mut self, blocked: &[char]) -> char {
        let allowed: Vec<char> = CHARSET.iter().copied().filter(|c| !blocked.contains(c)).collect();
        let pool = if allowed.is_empty() { CHARSET } else { allowed.as_slice() };
        pool[self.random.pick_index(pool.len())]
    }
}

fn neighbor_letters(store: &TileStore, coord: Coord) -> Vec<char> {
    store.path_neighbors(coord).iter().filter_map(|tile| tile.letter()).collect()
}

fn is_writable(store: &TileStore, branch: &Branch) -> bool {
    let first = branch.tiles[0];
    match store.get(first) {
        Some(tile) => tile.letter().is_none(),
        None => {
            log::warn!("branch tile at {},{} not found", first.x, first.y);
            false
        }
    }
}

fn write_word(store: &mut TileStore, branch: &Branch, word: &str, events: &mut Vec<SessionEvent>) {
    debug_assert_eq!(word.chars().count(), branch.tiles.len(), "word must cover the branch");
    for (&coord, letter) in branch.tiles.iter().zip(word.chars()) {
        let Some(tile) = store.get_mut(coord) else {
            log::warn!("cannot letter missing tile at {},{}", coord.x, coord.y);
            continue;
        };
        if tile.set_letter(letter) {
            events.push(SessionEvent::TileLettered { coord, letter });
        }
    }
}
