use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A stderr spinner shown while waiting for the first fragment.
///
/// Clears itself when dropped.
pub struct Spinner {
    progress_bar: Option<ProgressBar>,
}

impl Spinner {
    /// Starts a spinner, or a no-op one when `enabled` is false.
    pub fn new(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { progress_bar: None };
        }

        let progress_bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            progress_bar.set_style(style.tick_strings(TICKS));
        }
        progress_bar.set_message(message.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            progress_bar: Some(progress_bar),
        }
    }

    /// Stops the spinner and clears it from the terminal.
    pub fn stop(&self) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
