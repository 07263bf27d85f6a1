use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use std::path::PathBuf;

use super::{HistoryEntry, HistoryRecord, HistorySink};
use crate::paths;

/// History stored in a local `SQLite` database.
pub struct SqliteHistory {
    db_path: PathBuf,
}

impl SqliteHistory {
    /// Opens (and creates if needed) the default history database.
    pub fn new() -> Result<Self> {
        let data_dir = paths::data_dir()?;

        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        Self::open(data_dir.join("history.db"))
    }

    /// Opens a history database at an explicit path.
    pub fn open(db_path: PathBuf) -> Result<Self> {
        let history = Self { db_path };
        history.init_db()?;
        Ok(history)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                provider TEXT NOT NULL,
                input TEXT NOT NULL,
                output TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create history table")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).with_context(|| {
            format!(
                "Failed to open history database: {}",
                self.db_path.display()
            )
        })
    }

    /// Returns the most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT kind, provider, input, output, created_at
             FROM history ORDER BY id DESC LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map([limit], |row| {
            Ok(HistoryRecord {
                kind: row.get(0)?,
                provider: row.get(1)?,
                input: row.get(2)?,
                output: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let records = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read history")?;
        Ok(records)
    }

    /// Deletes every entry and returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM history", [])
            .context("Failed to clear history")
    }
}

impl HistorySink for SqliteHistory {
    fn record(&self, entry: &HistoryEntry<'_>) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT INTO history (kind, provider, input, output) VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.kind.as_str(),
                entry.provider.as_str(),
                entry.input,
                entry.output
            ],
        )
        .context("Failed to insert history entry")?;

        Ok(())
    }
}
