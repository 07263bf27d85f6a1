//! Interactive chat mode for asking questions.
//!
//! Provides a REPL-style interface with slash commands for switching the
//! provider and model.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::{ChatSession, SessionConfig};
