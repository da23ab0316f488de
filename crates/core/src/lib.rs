pub mod config;
pub mod content;
pub mod game;
pub mod hazard;
pub mod journal;
pub mod mapgen;
pub mod random;
pub mod replay;
pub mod state;
pub mod types;
pub mod words;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, GameConfig};
pub use content::{Dictionary, DictionaryError};
pub use game::{GameSession, SessionError};
pub use journal::{InputJournal, InputRecord};
pub use replay::*;
pub use state::{Tile, TileStore};
pub use types::*;
