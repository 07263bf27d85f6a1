use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::fs::atomic_write;
use crate::paths;
use crate::provider::{CredentialConfig, ProviderId};
use crate::translation::AUTO_DETECT;

/// Provider used when neither the CLI nor the config file names one.
pub const DEFAULT_PROVIDER: ProviderId = ProviderId::Google;

/// Default settings in the `[lingo]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Default provider id.
    pub provider: Option<String>,
    /// Default source language code (`auto` to detect).
    pub from: Option<String>,
    /// Default target language code.
    pub to: Option<String>,
    /// Legacy single API token, tried for any provider after `api_keys`
    /// and environment variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/lingo/config.toml`:
///
/// ```toml
/// [lingo]
/// provider = "deepseek"
/// to = "zh"
///
/// [api_keys]
/// deepseek = "sk-..."
///
/// [models]
/// openai = "gpt-4o"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub lingo: Defaults,
    /// API keys keyed by provider id.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    /// Model overrides keyed by provider id.
    #[serde(default)]
    pub models: HashMap<String, String>,
}

impl ConfigFile {
    /// The layered credential configuration for the provider clients.
    pub fn credentials(&self) -> CredentialConfig {
        CredentialConfig {
            api_keys: self.api_keys.clone(),
            token: self.lingo.token.clone(),
        }
    }
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub model: Option<String>,
}

/// Settings after merging CLI options, the config file, and built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub provider: ProviderId,
    pub source_lang: String,
    /// `None` lets the caller pick a target based on the input text.
    pub target_lang: Option<String>,
    pub model: Option<String>,
    pub credentials: CredentialConfig,
}

/// Merges CLI options with config file settings.
///
/// Priority: CLI option, then config file, then built-in default.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let provider = match options
        .provider
        .as_deref()
        .or(config_file.lingo.provider.as_deref())
    {
        Some(id) => id.parse::<ProviderId>()?,
        None => DEFAULT_PROVIDER,
    };

    let source_lang = options
        .from
        .as_ref()
        .or(config_file.lingo.from.as_ref())
        .cloned()
        .unwrap_or_else(|| AUTO_DETECT.to_string());

    let target_lang = options
        .to
        .as_ref()
        .or(config_file.lingo.to.as_ref())
        .cloned();

    let model = options
        .model
        .as_ref()
        .or_else(|| config_file.models.get(provider.as_str()))
        .cloned();

    Ok(ResolvedConfig {
        provider,
        source_lang,
        target_lang,
        model,
        credentials: config_file.credentials(),
    })
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses `$XDG_CONFIG_HOME/lingo/config.toml` or `~/.config/lingo/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("nested").join("config.toml"),
        }
    }

    fn create_test_config() -> ConfigFile {
        ConfigFile {
            lingo: Defaults {
                provider: Some("deepseek".to_string()),
                from: Some("en".to_string()),
                to: Some("ja".to_string()),
                token: None,
            },
            api_keys: HashMap::from([("deepseek".to_string(), "sk-file".to_string())]),
            models: HashMap::from([("deepseek".to_string(), "deepseek-reasoner".to_string())]),
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        let config = create_test_config();

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default().unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_load_or_default_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::create_dir_all(manager.config_path().parent().unwrap()).unwrap();
        fs::write(manager.config_path(), "[lingo\nprovider = ").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    fn test_parse_minimal_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            [lingo]
            token = "legacy"

            [api_keys]
            qwen = "sk-qwen"
            "#,
        )
        .unwrap();

        let credentials = config.credentials();
        assert_eq!(credentials.token.as_deref(), Some("legacy"));
        assert_eq!(credentials.api_keys["qwen"], "sk-qwen");
        assert!(config.models.is_empty());
    }

    #[test]
    fn test_resolve_config_falls_back_to_file() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();

        assert_eq!(resolved.provider, ProviderId::DeepSeek);
        assert_eq!(resolved.source_lang, "en");
        assert_eq!(resolved.target_lang.as_deref(), Some("ja"));
        assert_eq!(resolved.model.as_deref(), Some("deepseek-reasoner"));
        assert_eq!(resolved.credentials.api_keys["deepseek"], "sk-file");
    }

    #[test]
    fn test_resolve_config_builtin_defaults() {
        let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

        assert_eq!(resolved.provider, DEFAULT_PROVIDER);
        assert_eq!(resolved.source_lang, AUTO_DETECT);
        assert!(resolved.target_lang.is_none());
        assert!(resolved.model.is_none());
    }

    #[test]
    fn test_resolve_config_unknown_provider() {
        let options = ResolveOptions {
            provider: Some("bing".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("unknown provider"));
        assert!(err.downcast_ref::<crate::error::ProviderError>().is_some());
    }

    #[test]
    fn test_model_override_only_applies_to_its_provider() {
        let options = ResolveOptions {
            provider: Some("openai".to_string()),
            ..ResolveOptions::default()
        };

        let resolved = resolve_config(&options, &create_test_config()).unwrap();
        assert_eq!(resolved.provider, ProviderId::OpenAi);
        assert!(resolved.model.is_none());
    }
}
