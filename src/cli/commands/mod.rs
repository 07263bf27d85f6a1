//! Subcommand implementations.

use anyhow::Result;
use futures_util::StreamExt;
use std::io::{self, Write};
use std::sync::Arc;

use crate::client::FragmentStream;
use crate::history::{HistorySink, SqliteHistory};
use crate::ui::Spinner;

/// Ask command handler.
pub mod ask;

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// History listing command handler.
pub mod history;

/// Provider listing command handler.
pub mod providers;

/// Translation command handler.
pub mod translate;

/// Opens the history database unless recording is disabled.
///
/// A history database that cannot be opened only costs the record, never the
/// command.
pub(crate) fn history_sink(no_history: bool) -> Option<Arc<dyn HistorySink>> {
    if no_history {
        return None;
    }

    match SqliteHistory::new() {
        Ok(history) => Some(Arc::new(history)),
        Err(e) => {
            tracing::warn!("history disabled: {e:#}");
            None
        }
    }
}

/// Prints fragments to stdout as they arrive and returns the trimmed output.
///
/// The spinner is cleared before the first fragment is written.
pub(crate) async fn print_stream(mut fragments: FragmentStream, spinner: &Spinner) -> Result<String> {
    let mut output = String::new();
    let mut first_chunk = true;
    let mut stdout = io::stdout();

    while let Some(fragment) = fragments.next().await {
        if first_chunk {
            spinner.stop();
            first_chunk = false;
        }

        write!(stdout, "{fragment}")?;
        stdout.flush()?;
        output.push_str(&fragment);
    }

    if first_chunk {
        spinner.stop();
    }

    if !output.is_empty() {
        writeln!(stdout)?;
    }

    Ok(output.trim().to_string())
}
