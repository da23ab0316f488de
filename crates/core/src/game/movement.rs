//! Letter-driven movement and backtracking.

use super::*;

impl GameSession {
    /// Steps onto the first neighbor, in right, up, down, left order, whose
    /// letter matches. The tile the player just came from is never selected.
    pub fn move_forward(&mut self, letter: char) -> MoveOutcome {
        if !self.is_running() {
            return MoveOutcome::Ignored;
        }

        let previous = self.history.last().copied();
        let Some(next) = self
            .store
            .path_neighbors(self.current)
            .into_iter()
            .find(|tile| tile.letter() == Some(letter) && Some(tile.coord) != previous)
            .map(|tile| tile.coord)
        else {
            self.events.push(SessionEvent::InputRejected { input: letter });
            return MoveOutcome::Rejected;
        };

        let came_from = self.current;
        self.history.push(came_from);
        if let Some(tile) = self.store.get_mut(next) {
            tile.record_visit();
        }
        self.events.push(SessionEvent::TileVisited { coord: next });
        self.current = next;

        self.ensure_chunks_ahead();
        self.words.render_next_words_if_necessary(
            &mut self.store,
            next,
            Some(came_from),
            &mut self.events,
        );
        self.check_player_death();
        MoveOutcome::Moved { to: next }
    }

    pub fn move_backward(&mut self) -> MoveOutcome {
        if !self.is_running() {
            return MoveOutcome::Ignored;
        }
        let Some(&target) = self.history.last() else {
            return MoveOutcome::Ignored;
        };
        if !self.store.contains(target) {
            log::warn!("history tile {},{} was evicted; cannot step back", target.x, target.y);
            return MoveOutcome::Ignored;
        }

        self.history.pop();
        let left = self.current;
        if let Some(tile) = self.store.get_mut(left) {
            tile.record_back();
        }
        self.events.push(SessionEvent::TileBacktracked { coord: left });
        self.current = target;

        self.check_player_death();
        MoveOutcome::Moved { to: target }
    }

    /// Steps back until the player stands on a word separator or history runs out.
    pub fn move_backward_word(&mut self) -> MoveOutcome {
        let mut outcome = MoveOutcome::Ignored;
        loop {
            match self.move_backward() {
                moved @ MoveOutcome::Moved { .. } => outcome = moved,
                _ => break,
            }
            let on_separator = self.current_tile().and_then(Tile::letter) == Some(' ');
            if on_separator || self.history.is_empty() {
                break;
            }
        }
        outcome
    }
}
