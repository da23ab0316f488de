use serde::{Deserialize, Serialize};

/// Integer world coordinate. `x` grows toward the generation frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Orthogonal neighbors in the stable enumeration order right, up, down, left.
    ///
    /// Word placement consumes its random stream in this order, so changing it
    /// changes every generated word sequence.
    pub fn neighbors(self) -> [Coord; 4] {
        [
            Coord { x: self.x + 1, y: self.y },
            Coord { x: self.x, y: self.y - 1 },
            Coord { x: self.x, y: self.y + 1 },
            Coord { x: self.x - 1, y: self.y },
        ]
    }
}

/// Discrete input delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Char(char),
    DeleteChar,
    DeleteWord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Dead { score: i32 },
}

impl SessionStatus {
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { to: Coord },
    /// The typed letter matched no selectable neighbor.
    Rejected,
    /// Nothing happened: empty history, missing tile, or dead session.
    Ignored,
}

/// State-change notifications accumulated for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    TileVisited { coord: Coord },
    TileBacktracked { coord: Coord },
    TileLettered { coord: Coord, letter: char },
    TileIgnited { coord: Coord },
    InputRejected { input: char },
    PlayerDied { score: i32 },
}
