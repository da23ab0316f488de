use thiserror::Error;

use crate::content::Dictionary;
use crate::game::{GameSession, SessionError};
use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION};
use crate::types::SessionStatus;

#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("unsupported journal format version {0}")]
    UnsupportedVersion(u16),
    #[error("frame_ms must be positive")]
    ZeroFrame,
    #[error("input {seq} at {at_ms} ms precedes the input before it")]
    InputsOutOfOrder { seq: u64, at_ms: u64 },
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_status: SessionStatus,
    pub final_time_ms: u64,
    pub final_snapshot_hash: u64,
}

/// Re-runs a journal: each frame applies every input due by the frame time, then ticks.
pub fn replay_to_end(
    journal: &InputJournal,
    dictionary: &Dictionary,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion(journal.format_version));
    }
    if journal.frame_ms == 0 {
        return Err(ReplayError::ZeroFrame);
    }
    if let Some(pair) = journal.inputs.windows(2).find(|pair| pair[1].at_ms < pair[0].at_ms) {
        return Err(ReplayError::InputsOutOfOrder { seq: pair[1].seq, at_ms: pair[1].at_ms });
    }

    let mut session = GameSession::new(journal.config.clone(), dictionary.clone())?;
    let mut pending = journal.inputs.iter().peekable();
    let mut now_ms = 0;

    loop {
        while let Some(record) = pending.next_if(|record| record.at_ms <= now_ms) {
            session.apply_input(record.input);
        }
        session.tick(now_ms);
        session.drain_events();

        if session.status().is_dead() || now_ms >= journal.end_ms {
            break;
        }
        now_ms = (now_ms + journal.frame_ms).min(journal.end_ms);
    }

    Ok(ReplayResult {
        final_status: session.status(),
        final_time_ms: now_ms,
        final_snapshot_hash: session.snapshot_hash(),
    })
}
