//! Turn records.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Processing state of one turn.
///
/// `Processing` is the atomic claim held while a pass runs; on failure the
/// claim is released and the turn reverts to `Unprocessed`, so a retry
/// re-runs the whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    Unprocessed,
    Processing,
    Processed,
}

/// One record per day-index turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub number: u32,
    /// World seed captured for this turn's RNG streams.
    pub seed: String,
    pub state: TurnState,
    /// Set exactly once, when the turn commits.
    pub processed_at: Option<SystemTime>,
}

impl TurnRecord {
    pub fn new(number: u32, seed: impl Into<String>) -> Self {
        TurnRecord {
            number,
            seed: seed.into(),
            state: TurnState::Unprocessed,
            processed_at: None,
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self.state, TurnState::Processed)
    }
}
