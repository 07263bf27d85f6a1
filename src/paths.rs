//! XDG-style locations for configuration and data.
//!
//! XDG variables win over platform-specific directories so that the tool
//! behaves the same on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "lingo";

/// Returns the configuration directory.
///
/// `$XDG_CONFIG_HOME/lingo` if set, `~/.config/lingo` otherwise.
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// Returns the data directory (history database).
///
/// `$XDG_DATA_HOME/lingo` if set, `~/.local/share/lingo` otherwise.
pub fn data_dir() -> Result<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

fn xdg_dir(var: &str, fallback: &[&str]) -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(var)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir).join(APP_DIR));
    }

    let mut dir = dirs::home_dir().context("Failed to determine home directory")?;
    dir.extend(fallback);
    Ok(dir.join(APP_DIR))
}
