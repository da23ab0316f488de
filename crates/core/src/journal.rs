use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::types::InputEvent;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Timestamped inputs of one run, enough to reproduce it frame by frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub config: GameConfig,
    /// Host clock step between ticks.
    pub frame_ms: u64,
    /// Replay stops here if the player is still alive.
    pub end_ms: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub at_ms: u64,
    pub input: InputEvent,
}

impl InputJournal {
    pub fn new(config: GameConfig, frame_ms: u64, end_ms: u64) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, config, frame_ms, end_ms, inputs: Vec::new() }
    }

    pub fn append(&mut self, at_ms: u64, input: InputEvent) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, at_ms, input });
    }

    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
