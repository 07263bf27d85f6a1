//! Credential resolution for providers.
//!
//! A credential is looked up in three layers, first non-empty value wins:
//!
//! 1. `api_keys[<provider id>]` from the caller's configuration
//! 2. the provider's environment variable (e.g. `DEEPSEEK_API_KEY`)
//! 3. the legacy single `token` field

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ProviderDescriptor;
use crate::error::ProviderError;

/// Layered credential configuration supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// API keys keyed by provider id (`deepseek`, `qwen`, `openai`).
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    /// Legacy single token, used for any provider when nothing else is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CredentialConfig {
    /// Sets the API key for one provider.
    #[must_use]
    pub fn with_api_key(mut self, provider: &str, key: impl Into<String>) -> Self {
        self.api_keys.insert(provider.to_string(), key.into());
        self
    }
}

/// A secret bound to one provider for the duration of a call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// The empty credential used by providers that need none.
    pub const fn none() -> Self {
        Self(String::new())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(none)")
        } else {
            f.write_str("Credential(***)")
        }
    }
}

/// Resolves the credential for `descriptor` using the process environment.
pub fn resolve_credential(
    descriptor: &ProviderDescriptor,
    config: &CredentialConfig,
) -> Result<Credential, ProviderError> {
    resolve_with_env(descriptor, config, |name| std::env::var(name).ok())
}

/// Resolves a credential with an injectable environment lookup.
pub fn resolve_with_env<F>(
    descriptor: &ProviderDescriptor,
    config: &CredentialConfig,
    env: F,
) -> Result<Credential, ProviderError>
where
    F: Fn(&str) -> Option<String>,
{
    if !descriptor.requires_credential() {
        return Ok(Credential::none());
    }

    let from_config = config.api_keys.get(descriptor.id.as_str()).cloned();
    let from_env = || descriptor.credential_env_var.as_deref().and_then(&env);
    let from_token = || config.token.clone();

    [from_config, from_env(), from_token()]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .map(Credential)
        .ok_or_else(|| ProviderError::missing_credential(descriptor))
}
