//! Diagnostic logging setup.
//!
//! Logs go to stderr so translated text on stdout stays pipeable. The filter
//! comes from `LINGO_LOG` (e.g. `LINGO_LOG=lingo=trace`) and defaults to
//! warnings only, or to debug output for this crate with `--verbose`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "LINGO_LOG";

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "lingo=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_ansi(std::env::var_os("NO_COLOR").is_none());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
