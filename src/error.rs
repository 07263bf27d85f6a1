//! Provider error taxonomy and normalization.
//!
//! Every failure in the provider engine ends up as a [`ProviderError`]: a
//! closed [`ErrorKind`], a human-readable hint, and an HTTP-style status code
//! that can be passed straight through to an HTTP boundary.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::provider::ProviderDescriptor;

/// Longest provider message kept from a raw (non-JSON) error body.
const MAX_MESSAGE_CHARS: usize = 500;

/// Network-level failure codes recognized by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkCode {
    ConnectionReset,
    ConnectionRefused,
    TimedOut,
    HostNotFound,
    /// The response arrived but its body could not be read.
    BodyUnavailable,
    Other,
}

impl NetworkCode {
    /// Conventional short code, as printed in hints and logs.
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConnectionReset => "ECONNRESET",
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::TimedOut => "ETIMEDOUT",
            Self::HostNotFound => "ENOTFOUND",
            Self::BodyUnavailable => "EBODY",
            Self::Other => "EOTHER",
        }
    }

    /// Walks an error's source chain looking for a recognizable cause.
    pub fn detect(err: &(dyn StdError + 'static)) -> Self {
        let mut current = Some(err);

        while let Some(err) = current {
            if let Some(io_err) = err.downcast_ref::<io::Error>()
                && let Some(code) = Self::from_io_kind(io_err.kind())
            {
                return code;
            }

            let message = err.to_string().to_ascii_lowercase();
            if message.contains("dns error")
                || message.contains("failed to lookup address")
                || message.contains("name or service not known")
                || message.contains("no such host")
            {
                return Self::HostNotFound;
            }

            current = err.source();
        }

        Self::Other
    }

    const fn from_io_kind(kind: io::ErrorKind) -> Option<Self> {
        match kind {
            io::ErrorKind::ConnectionRefused => Some(Self::ConnectionRefused),
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => Some(Self::ConnectionReset),
            io::ErrorKind::TimedOut => Some(Self::TimedOut),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classification of a provider failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("missing API key for {provider}")]
    MissingCredential {
        provider: String,
        env_var: Option<String>,
    },

    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("network error ({0})")]
    NetworkError(NetworkCode),

    #[error("empty result")]
    EmptyResult,

    #[error("unsupported operation")]
    UnsupportedOperation,
}

/// A classified failure with a hint a user can act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {hint}")]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub hint: String,
    pub status_code: u16,
}

impl ProviderError {
    fn new(kind: ErrorKind, hint: String, status_code: u16) -> Self {
        Self {
            kind,
            hint,
            status_code,
        }
    }

    pub fn unknown_provider(id: &str) -> Self {
        Self::new(
            ErrorKind::UnknownProvider(id.to_string()),
            "Supported providers: google, deepseek, qwen, openai. Run 'lingo providers' for details."
                .to_string(),
            400,
        )
    }

    pub fn missing_credential(descriptor: &ProviderDescriptor) -> Self {
        let env_var = descriptor.credential_env_var.clone();
        let hint = match env_var.as_deref() {
            Some(var) => format!(
                "{} requires an API key. Set the {var} environment variable, \
                 or run 'lingo configure --key {}'.",
                descriptor.display_name, descriptor.id
            ),
            None => format!("{} requires an API key.", descriptor.display_name),
        };

        Self::new(
            ErrorKind::MissingCredential {
                provider: descriptor.display_name.clone(),
                env_var,
            },
            hint,
            401,
        )
    }

    pub fn unsupported_operation(descriptor: &ProviderDescriptor) -> Self {
        Self::new(
            ErrorKind::UnsupportedOperation,
            format!(
                "{} is a translation-only backend and does not support open-ended chat. \
                 Choose a chat provider such as deepseek, qwen or openai.",
                descriptor.display_name
            ),
            400,
        )
    }

    pub fn empty_result(descriptor: &ProviderDescriptor) -> Self {
        Self::new(
            ErrorKind::EmptyResult,
            format!(
                "{} returned an empty response. Try again or switch provider.",
                descriptor.display_name
            ),
            502,
        )
    }

    /// Classifies a non-success HTTP response.
    pub fn from_http_status(descriptor: &ProviderDescriptor, status: u16, body: &str) -> Self {
        let message = provider_message(body).unwrap_or_else(|| fallback_message(status, body));
        let name = &descriptor.display_name;

        let hint = match status {
            402 | 429 if descriptor.supports_chat() => format!(
                "{name} reports that the quota or billing balance is exhausted (HTTP {status}). \
                 Top up the account or switch provider with --provider."
            ),
            401 | 403 => match descriptor.credential_env_var.as_deref() {
                Some(var) => format!(
                    "{name} rejected the API key. Check {var} or the '{}' entry under [api_keys] \
                     in the config file.",
                    descriptor.id
                ),
                None => format!("{name} refused the request (HTTP {status})."),
            },
            _ => format!("{name} rejected the request (HTTP {status})."),
        };

        Self::new(ErrorKind::HttpError { status, message }, hint, status)
    }

    /// Classifies a transport-level failure.
    pub fn from_transport(descriptor: &ProviderDescriptor, err: &reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            NetworkCode::TimedOut
        } else {
            NetworkCode::detect(err)
        };
        Self::from_network_code(descriptor, code)
    }

    /// Builds a network error for a known code.
    pub fn from_network_code(descriptor: &ProviderDescriptor, code: NetworkCode) -> Self {
        let name = &descriptor.display_name;
        let host = descriptor.host();

        let hint = match code {
            NetworkCode::Other => format!(
                "Request to {name} ({host}) failed. Check your network or proxy settings, \
                 or switch provider with --provider."
            ),
            NetworkCode::BodyUnavailable => format!(
                "{name} ({host}) sent a response whose body could not be read. Try again \
                 or switch provider with --provider."
            ),
            _ => format!(
                "Could not reach {name} at {host} ({code}). Check your network or proxy \
                 settings, or switch provider with --provider."
            ),
        };

        let status = match code {
            NetworkCode::TimedOut => 504,
            _ => 502,
        };

        Self::new(ErrorKind::NetworkError(code), hint, status)
    }
}

/// Extracts the provider's own error message from a JSON error body.
fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    [
        value.pointer("/error/message"),
        value.get("message"),
        value.get("error"),
    ]
    .into_iter()
    .flatten()
    .find_map(|v| v.as_str())
    .map(str::trim)
    .filter(|m| !m.is_empty())
    .map(str::to_string)
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed")
            .to_string();
    }
    body.chars().take(MAX_MESSAGE_CHARS).collect()
}
