use anyhow::Result;

use crate::chat::{ChatSession, SessionConfig};
use crate::cli::{BackendArgs, GlobalArgs};
use crate::client::ChatClient;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::error::ProviderError;
use crate::provider::ProviderRegistry;

use super::history_sink;

pub async fn run_chat(backend: BackendArgs, global: GlobalArgs) -> Result<()> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let resolved = resolve_config(
        &ResolveOptions {
            provider: backend.provider,
            model: backend.model,
            ..ResolveOptions::default()
        },
        &config_file,
    )?;

    let registry = ProviderRegistry::builtin();
    let descriptor = registry.get(resolved.provider);
    if !descriptor.supports_chat() {
        return Err(ProviderError::unsupported_operation(descriptor).into());
    }

    let mut client = ChatClient::new(registry);
    if let Some(sink) = history_sink(global.no_history) {
        client = client.with_history(sink);
    }

    let config = SessionConfig {
        provider: resolved.provider,
        model: resolved.model,
        credentials: resolved.credentials,
        configured_models: config_file.models,
        spinner: !global.quiet,
    };

    let mut session = ChatSession::new(config, client);
    session.run().await
}
