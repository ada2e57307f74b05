//! Narration log entries.
//!
//! Append-only, player-facing history. Entries are scoped either to the
//! whole world or to one empire, and tagged with the turn that produced
//! them. Never mutated or deleted.

use serde::{Deserialize, Serialize};

use super::empire::EmpireId;

/// Visibility scope of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogScope {
    Global,
    Empire(EmpireId),
}

/// One line of game narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub scope: LogScope,
    pub message: String,
}

impl LogEntry {
    pub fn global(turn: u32, message: impl Into<String>) -> Self {
        LogEntry { turn, scope: LogScope::Global, message: message.into() }
    }

    pub fn empire(turn: u32, empire: EmpireId, message: impl Into<String>) -> Self {
        LogEntry { turn, scope: LogScope::Empire(empire), message: message.into() }
    }
}
