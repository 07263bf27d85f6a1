use anyhow::Result;

use crate::history::{HistoryRecord, SqliteHistory};
use crate::ui::Style;

const PREVIEW_CHARS: usize = 60;

/// Lists recent history entries, or deletes them all with `clear`.
pub fn run_history(limit: usize, clear: bool) -> Result<()> {
    let history = SqliteHistory::new()?;

    if clear {
        let removed = history.clear()?;
        println!("{} Removed {removed} entries", Style::success("✓"));
        return Ok(());
    }

    let records = history.recent(limit)?;
    if records.is_empty() {
        println!("{}", Style::secondary("No history yet."));
        return Ok(());
    }

    for record in &records {
        print_record(record);
    }
    Ok(())
}

fn print_record(record: &HistoryRecord) {
    println!(
        "{} {} {}",
        Style::secondary(&record.created_at),
        Style::label(&record.kind),
        Style::secondary(format!("[{}]", record.provider))
    );
    println!("  {}", preview(&record.input));
    println!("  {} {}", Style::secondary("→"), Style::value(preview(&record.output)));
}

/// First line of `text`, shortened to a fixed number of characters.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    let mut shortened: String = line.chars().take(PREVIEW_CHARS).collect();
    if shortened.len() < line.len() || text.lines().nth(1).is_some() {
        shortened.push('…');
    }
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "字".repeat(100);
        let shortened = preview(&long);
        assert_eq!(shortened.chars().count(), PREVIEW_CHARS + 1);
        assert!(shortened.ends_with('…'));
    }

    #[test]
    fn test_preview_marks_multiline_text() {
        assert_eq!(preview("first\nsecond"), "first…");
    }
}
