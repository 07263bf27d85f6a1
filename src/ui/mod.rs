use anyhow::Result;
use inquire::InquireError;

use crate::error::ProviderError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs a function that uses interactive prompts, treating Ctrl+C or Escape
/// as a clean exit instead of an error.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Ok(()) => Ok(()),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Prints an error to stderr, with the provider hint on its own line.
pub fn print_error(err: &anyhow::Error) {
    if let Some(provider_err) = err.downcast_ref::<ProviderError>() {
        eprintln!("{} {}", Style::error("Error:"), provider_err.kind);
        eprintln!("  {}", Style::hint(&provider_err.hint));
    } else {
        eprintln!("{} {err:#}", Style::error("Error:"));
    }
}
