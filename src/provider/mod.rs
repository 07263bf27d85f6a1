//! Backend providers and the registry that describes them.
//!
//! Every backend is named by the closed [`ProviderId`] enum. A
//! [`ProviderRegistry`] maps each id to its [`ProviderDescriptor`] and is
//! built once, then handed to the clients by value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ProviderError;

pub mod credential;

pub use credential::{Credential, CredentialConfig, resolve_credential};

/// Identifies one supported backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    /// Google's free translation endpoint. Translation only, no credential.
    Google,
    DeepSeek,
    /// Qwen through DashScope's OpenAI-compatible mode.
    Qwen,
    OpenAi,
}

impl ProviderId {
    /// All providers, in display order.
    pub const ALL: [Self; 4] = [Self::Google, Self::DeepSeek, Self::Qwen, Self::OpenAi];

    /// The identifier used in configuration files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::DeepSeek => "deepseek",
            Self::Qwen => "qwen",
            Self::OpenAi => "openai",
        }
    }

    /// Parses a provider identifier, accepting a few common aliases.
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "deepseek" => Some(Self::DeepSeek),
            "qwen" => Some(Self::Qwen),
            "openai" | "gpt" | "chatgpt" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ProviderError::unknown_provider(s))
    }
}

/// Static description of a backend: where it lives and how it authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub display_name: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Environment variable holding the API key, if the provider needs one.
    pub credential_env_var: Option<String>,
    pub default_model: Option<String>,
}

impl ProviderDescriptor {
    fn new(
        id: ProviderId,
        display_name: &str,
        base_url: &str,
        credential_env_var: Option<&str>,
        default_model: Option<&str>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credential_env_var: credential_env_var.map(str::to_string),
            default_model: default_model.map(str::to_string),
        }
    }

    /// Returns a copy of this descriptor pointing at another base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// `true` unless this is the credential-free translation backend.
    pub const fn requires_credential(&self) -> bool {
        !matches!(self.id, ProviderId::Google)
    }

    /// `true` if the provider can answer open-ended questions.
    pub const fn supports_chat(&self) -> bool {
        match self.id {
            ProviderId::Google => false,
            ProviderId::DeepSeek | ProviderId::Qwen | ProviderId::OpenAi => true,
        }
    }

    /// The chat-completions endpoint for this provider.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Host (and port, when present) of the base URL, used in error hints.
    pub fn host(&self) -> &str {
        let rest = self
            .base_url
            .split_once("://")
            .map_or(self.base_url.as_str(), |(_, rest)| rest);
        rest.split(['/', '?', '#']).next().unwrap_or(rest)
    }
}

/// Immutable table of provider descriptors.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    descriptors: HashMap<ProviderId, ProviderDescriptor>,
}

impl ProviderRegistry {
    /// The registry of built-in backends.
    pub fn builtin() -> Self {
        let descriptors = [
            ProviderDescriptor::new(
                ProviderId::Google,
                "Google",
                "https://translate.googleapis.com",
                None,
                None,
            ),
            ProviderDescriptor::new(
                ProviderId::DeepSeek,
                "DeepSeek",
                "https://api.deepseek.com",
                Some("DEEPSEEK_API_KEY"),
                Some("deepseek-chat"),
            ),
            ProviderDescriptor::new(
                ProviderId::Qwen,
                "Qwen",
                "https://dashscope.aliyuncs.com/compatible-mode/v1",
                Some("DASHSCOPE_API_KEY"),
                Some("qwen-plus"),
            ),
            ProviderDescriptor::new(
                ProviderId::OpenAi,
                "OpenAI",
                "https://api.openai.com/v1",
                Some("OPENAI_API_KEY"),
                Some("gpt-4o-mini"),
            ),
        ];

        Self {
            descriptors: descriptors.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    /// Replaces the descriptor for `descriptor.id`.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: ProviderDescriptor) -> Self {
        self.descriptors.insert(descriptor.id, descriptor);
        self
    }

    /// Returns the descriptor for a provider.
    pub fn get(&self, id: ProviderId) -> &ProviderDescriptor {
        // Every constructor fills all ids and `with_descriptor` only replaces.
        &self.descriptors[&id]
    }

    /// Looks up a descriptor by its string identifier.
    pub fn lookup(&self, id: &str) -> Result<&ProviderDescriptor, ProviderError> {
        let id: ProviderId = id.parse()?;
        Ok(self.get(id))
    }

    /// Iterates descriptors in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        ProviderId::ALL.into_iter().map(|id| self.get(id))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_provider_ids() {
        assert_eq!(ProviderId::parse("google"), Some(ProviderId::Google));
        assert_eq!(ProviderId::parse("DeepSeek"), Some(ProviderId::DeepSeek));
        assert_eq!(ProviderId::parse(" qwen "), Some(ProviderId::Qwen));
        assert_eq!(ProviderId::parse("gpt"), Some(ProviderId::OpenAi));
        assert_eq!(ProviderId::parse("bing"), None);
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for id in ProviderId::ALL {
            assert_eq!(ProviderId::parse(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_lookup_unknown_provider() {
        let registry = ProviderRegistry::builtin();
        let Err(err) = registry.lookup("nope") else {
            panic!("expected an error");
        };
        assert_eq!(err.kind, ErrorKind::UnknownProvider("nope".to_string()));
        assert_eq!(err.status_code, 400);
    }

    #[test]
    fn test_builtin_has_exactly_one_free_provider() {
        let registry = ProviderRegistry::builtin();
        let free: Vec<_> = registry
            .iter()
            .filter(|d| !d.requires_credential())
            .collect();
        assert_eq!(free.len(), 1);
        assert!(!free[0].supports_chat());
        assert!(free[0].credential_env_var.is_none());
    }

    #[test]
    fn test_chat_providers_have_env_var_and_model() {
        let registry = ProviderRegistry::builtin();
        for descriptor in registry.iter().filter(|d| d.supports_chat()) {
            assert!(descriptor.credential_env_var.is_some());
            assert!(descriptor.default_model.is_some());
        }
    }

    #[test]
    fn test_with_descriptor_replaces_entry() {
        let fake = ProviderRegistry::builtin()
            .get(ProviderId::OpenAi)
            .clone()
            .with_base_url("http://127.0.0.1:9999/v1/");
        let registry = ProviderRegistry::builtin().with_descriptor(fake);

        let openai = registry.get(ProviderId::OpenAi);
        assert_eq!(openai.base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(
            openai.chat_completions_url(),
            "http://127.0.0.1:9999/v1/chat/completions"
        );
    }

    #[test]
    fn test_host_extraction() {
        let registry = ProviderRegistry::builtin();
        assert_eq!(
            registry.get(ProviderId::Qwen).host(),
            "dashscope.aliyuncs.com"
        );
        assert_eq!(registry.get(ProviderId::DeepSeek).host(), "api.deepseek.com");

        let local = registry
            .get(ProviderId::OpenAi)
            .clone()
            .with_base_url("http://127.0.0.1:8080/v1");
        assert_eq!(local.host(), "127.0.0.1:8080");
    }
}
