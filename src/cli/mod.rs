//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, BackendArgs, Command, GlobalArgs};

use crate::error::{ErrorKind, ProviderError};

/// Invalid user input found after argument parsing (e.g. a bad language code).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UsageError(pub String);

impl UsageError {
    pub fn wrap(err: &anyhow::Error) -> anyhow::Error {
        anyhow::Error::new(Self(format!("{err:#}")))
    }
}

/// Maps an error to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    if err.downcast_ref::<UsageError>().is_some() {
        return exitcode::USAGE;
    }

    let Some(provider_err) = err.downcast_ref::<ProviderError>() else {
        return exitcode::SOFTWARE;
    };

    match provider_err.kind {
        ErrorKind::UnknownProvider(_) | ErrorKind::UnsupportedOperation => exitcode::USAGE,
        ErrorKind::MissingCredential { .. } => exitcode::CONFIG,
        ErrorKind::NetworkError(_) => exitcode::UNAVAILABLE,
        ErrorKind::HttpError { .. } | ErrorKind::EmptyResult => exitcode::PROTOCOL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkCode;
    use crate::provider::{ProviderId, ProviderRegistry};

    #[test]
    fn test_exit_codes() {
        let registry = ProviderRegistry::builtin();
        let openai = registry.get(ProviderId::OpenAi);

        let cases = [
            (ProviderError::unknown_provider("x"), exitcode::USAGE),
            (
                ProviderError::unsupported_operation(registry.get(ProviderId::Google)),
                exitcode::USAGE,
            ),
            (ProviderError::missing_credential(openai), exitcode::CONFIG),
            (
                ProviderError::from_network_code(openai, NetworkCode::HostNotFound),
                exitcode::UNAVAILABLE,
            ),
            (
                ProviderError::from_http_status(openai, 500, ""),
                exitcode::PROTOCOL,
            ),
            (ProviderError::empty_result(openai), exitcode::PROTOCOL),
        ];

        for (err, expected) in cases {
            assert_eq!(exit_code_for(&anyhow::Error::new(err)), expected);
        }
    }

    #[test]
    fn test_usage_error() {
        let err = UsageError::wrap(&anyhow::anyhow!("Invalid language code: 'xx'"));
        assert_eq!(exit_code_for(&err), exitcode::USAGE);
        assert!(err.to_string().contains("'xx'"));
    }

    #[test]
    fn test_other_errors_are_software_failures() {
        let err = anyhow::anyhow!("Input is empty");
        assert_eq!(exit_code_for(&err), exitcode::SOFTWARE);
    }

    #[test]
    fn test_context_keeps_provider_error_visible() {
        let err = anyhow::Error::new(ProviderError::unknown_provider("x")).context("while translating");
        assert_eq!(exit_code_for(&err), exitcode::USAGE);
    }
}
