//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigManager, DEFAULT_PROVIDER};
use crate::provider::credential::resolve_with_env;
use crate::provider::{CredentialConfig, ProviderDescriptor, ProviderId, ProviderRegistry};
use crate::ui::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialStatus {
    NotRequired,
    Set,
    NotSet,
}

impl CredentialStatus {
    fn of<F>(descriptor: &ProviderDescriptor, config: &CredentialConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if !descriptor.requires_credential() {
            Self::NotRequired
        } else if resolve_with_env(descriptor, config, env).is_ok() {
            Self::Set
        } else {
            Self::NotSet
        }
    }

    fn render(self) -> String {
        match self {
            Self::NotRequired => Style::secondary("not required"),
            Self::Set => Style::success("(set)"),
            Self::NotSet => Style::warning("(not set)"),
        }
    }
}

/// Prints every provider with its endpoint, default model, and whether a
/// credential is available.
pub fn print_providers() -> Result<()> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let credentials = config_file.credentials();
    let default_provider = config_file
        .lingo
        .provider
        .as_deref()
        .and_then(ProviderId::parse)
        .unwrap_or(DEFAULT_PROVIDER);

    let registry = ProviderRegistry::builtin();

    println!("{}\n", Style::header("Providers"));
    for id in ProviderId::ALL {
        let descriptor = registry.get(id);
        let status = CredentialStatus::of(descriptor, &credentials, |name| {
            std::env::var(name).ok()
        });

        println!(
            "  {}{}",
            Style::value(format!("{:<9}", id.as_str())),
            if id == default_provider {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            }
        );
        println!(
            "    {}  {}",
            Style::label("endpoint"),
            Style::secondary(descriptor.host())
        );
        if let Some(model) = &descriptor.default_model {
            let model = config_file.models.get(id.as_str()).unwrap_or(model);
            println!("    {}     {}", Style::label("model"), Style::value(model));
        }
        match &descriptor.credential_env_var {
            Some(env_var) => println!(
                "    {}   {} {}",
                Style::label("api key"),
                status.render(),
                Style::secondary(format!("${env_var}"))
            ),
            None => println!("    {}   {}", Style::label("api key"), status.render()),
        }
    }

    Ok(())
}
