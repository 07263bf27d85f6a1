//! Best-effort history of translations and answers.

use anyhow::Result;

use crate::provider::ProviderId;

mod sqlite;

pub use sqlite::SqliteHistory;

/// Which operation produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Translate,
    Ask,
}

impl EntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Ask => "ask",
        }
    }
}

/// One completed call, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct HistoryEntry<'a> {
    pub kind: EntryKind,
    pub provider: ProviderId,
    pub input: &'a str,
    pub output: &'a str,
}

/// A stored history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub kind: String,
    pub provider: String,
    pub input: String,
    pub output: String,
    pub created_at: String,
}

/// Destination for history entries.
pub trait HistorySink: Send + Sync {
    fn record(&self, entry: &HistoryEntry<'_>) -> Result<()>;
}

/// Records an entry, logging and discarding any failure.
pub fn record_best_effort(sink: Option<&dyn HistorySink>, entry: &HistoryEntry<'_>) {
    let Some(sink) = sink else {
        return;
    };

    if let Err(e) = sink.record(entry) {
        tracing::warn!("failed to record {} history: {e:#}", entry.kind.as_str());
    }
}
