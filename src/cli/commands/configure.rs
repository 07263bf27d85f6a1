//! Configure command handler for editing default settings and API keys.

use anyhow::{Result, bail};
use inquire::{Password, PasswordDisplayMode, Select};

use crate::cli::UsageError;
use crate::config::{ConfigFile, ConfigManager, DEFAULT_PROVIDER};
use crate::provider::{ProviderId, ProviderRegistry};
use crate::translation::{SUPPORTED_LANGUAGES, validate_language, validate_source_language};
use crate::ui::{Style, handle_prompt_cancellation};

/// Settings passed as `configure` flags.
#[derive(Debug, Default)]
pub struct ConfigureArgs {
    pub show: bool,
    pub provider: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub key: Option<String>,
}

impl ConfigureArgs {
    const fn has_edits(&self) -> bool {
        self.provider.is_some() || self.from.is_some() || self.to.is_some() || self.key.is_some()
    }
}

/// Runs the configure command.
///
/// `--show` prints the configuration, flags edit it directly, and without
/// flags the defaults are chosen interactively.
pub fn run_configure(args: ConfigureArgs) -> Result<()> {
    let manager = ConfigManager::new()?;

    if args.show {
        let config = manager.load_or_default()?;
        print_config(&manager, &config);
        return Ok(());
    }

    handle_prompt_cancellation(|| {
        let mut config = manager.load_or_default()?;

        if args.has_edits() {
            apply_flags(&mut config, &args)?;
        } else {
            print_config(&manager, &config);
            select_defaults(&mut config)?;
        }

        manager.save(&config)?;

        println!();
        println!(
            "{} Configuration saved to {}",
            Style::success("✓"),
            Style::secondary(manager.config_path().display().to_string())
        );
        Ok(())
    })
}

fn apply_flags(config: &mut ConfigFile, args: &ConfigureArgs) -> Result<()> {
    if let Some(provider) = &args.provider {
        let id: ProviderId = provider.parse()?;
        config.lingo.provider = Some(id.as_str().to_string());
    }

    if let Some(from) = &args.from {
        validate_source_language(from).map_err(|e| UsageError::wrap(&e))?;
        config.lingo.from = Some(from.clone());
    }

    if let Some(to) = &args.to {
        validate_language(to).map_err(|e| UsageError::wrap(&e))?;
        config.lingo.to = Some(to.clone());
    }

    if let Some(provider) = &args.key {
        let id: ProviderId = provider.parse()?;
        let registry = ProviderRegistry::builtin();
        let descriptor = registry.get(id);

        let Some(env_var) = &descriptor.credential_env_var else {
            return Err(UsageError::wrap(&anyhow::anyhow!(
                "{} does not use an API key",
                descriptor.display_name
            )));
        };

        let key = Password::new(&format!("{} API key:", descriptor.display_name))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .with_help_message(&format!("Stored in config.toml; ${env_var} is used when empty"))
            .prompt()?;

        let key = key.trim();
        if key.is_empty() {
            config.api_keys.remove(id.as_str());
        } else {
            config.api_keys.insert(id.as_str().to_string(), key.to_string());
        }
    }

    Ok(())
}

fn select_defaults(config: &mut ConfigFile) -> Result<()> {
    let providers: Vec<&str> = ProviderId::ALL.iter().map(|id| id.as_str()).collect();
    let current = config
        .lingo
        .provider
        .as_deref()
        .and_then(ProviderId::parse)
        .unwrap_or(DEFAULT_PROVIDER);
    let default_index = providers
        .iter()
        .position(|p| *p == current.as_str())
        .unwrap_or(0);

    let provider = Select::new("Default provider:", providers)
        .with_starting_cursor(default_index)
        .prompt()?;
    config.lingo.provider = Some(provider.to_string());

    config.lingo.to = Some(select_target_language(config.lingo.to.as_deref())?);
    Ok(())
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();

    let default_index = default
        .and_then(|d| SUPPORTED_LANGUAGES.iter().position(|(code, _)| *code == d))
        .unwrap_or(0);

    let selection = Select::new("Default target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let Some(code) = selection.split(" - ").next() else {
        bail!("Invalid selection: {selection}");
    };
    Ok(code.to_string())
}

fn print_config(manager: &ConfigManager, config: &ConfigFile) {
    let show = |value: Option<&str>| value.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display().to_string())
    );
    println!("  {}  {}", Style::label("provider"), show(config.lingo.provider.as_deref()));
    println!("  {}      {}", Style::label("from"), show(config.lingo.from.as_deref()));
    println!("  {}        {}", Style::label("to"), show(config.lingo.to.as_deref()));

    if config.lingo.token.is_some() {
        println!("  {}     {}", Style::label("token"), Style::value("(set)"));
    }

    let mut keys: Vec<_> = config.api_keys.iter().collect();
    keys.sort();
    for (provider, key) in keys {
        println!(
            "  {}  {}",
            Style::label(format!("api_keys.{provider}")),
            Style::value(mask_key(key))
        );
    }

    let mut models: Vec<_> = config.models.iter().collect();
    models.sort();
    for (provider, model) in models {
        println!(
            "  {}  {}",
            Style::label(format!("models.{provider}")),
            Style::value(model)
        );
    }
    println!();
}

/// Shows only enough of an API key to tell keys apart.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::exit_code_for;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-1234567890abcd"), "sk-****abcd");
        assert_eq!(mask_key("short"), "****");
        assert_eq!(mask_key(""), "****");
    }

    #[test]
    fn test_has_edits() {
        assert!(!ConfigureArgs::default().has_edits());
        assert!(
            ConfigureArgs {
                to: Some("ja".to_string()),
                ..ConfigureArgs::default()
            }
            .has_edits()
        );
    }

    #[test]
    fn test_apply_flags_normalizes_provider_alias() {
        let mut config = ConfigFile::default();
        let args = ConfigureArgs {
            provider: Some("chatgpt".to_string()),
            from: Some("auto".to_string()),
            to: Some("ja".to_string()),
            ..ConfigureArgs::default()
        };

        apply_flags(&mut config, &args).unwrap_or_else(|e| panic!("{e:#}"));
        assert_eq!(config.lingo.provider.as_deref(), Some("openai"));
        assert_eq!(config.lingo.from.as_deref(), Some("auto"));
        assert_eq!(config.lingo.to.as_deref(), Some("ja"));
    }

    #[test]
    fn test_apply_flags_rejects_invalid_values() {
        let mut config = ConfigFile::default();

        let args = ConfigureArgs {
            to: Some("auto".to_string()),
            ..ConfigureArgs::default()
        };
        let Err(err) = apply_flags(&mut config, &args) else {
            panic!("auto is not a target language");
        };
        assert_eq!(exit_code_for(&err), exitcode::USAGE);

        let args = ConfigureArgs {
            provider: Some("bing".to_string()),
            ..ConfigureArgs::default()
        };
        let Err(err) = apply_flags(&mut config, &args) else {
            panic!("bing is not a provider");
        };
        assert_eq!(exit_code_for(&err), exitcode::USAGE);
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_key_for_free_provider_is_rejected() {
        let mut config = ConfigFile::default();
        let args = ConfigureArgs {
            key: Some("google".to_string()),
            ..ConfigureArgs::default()
        };

        let Err(err) = apply_flags(&mut config, &args) else {
            panic!("google has no API key");
        };
        assert!(err.to_string().contains("does not use an API key"));
    }
}
