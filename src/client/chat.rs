use reqwest::Client;
use std::sync::Arc;

use super::transport::Transport;
use super::{FragmentStream, default_http_client, model_for};
use crate::error::ProviderError;
use crate::history::{EntryKind, HistorySink};
use crate::provider::{CredentialConfig, ProviderRegistry, resolve_credential};
use crate::translation::{RequestKind, RequestSpec, collect_fragments, decode_event_stream};

/// Options for one question.
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// Provider id, e.g. `deepseek`.
    pub provider: String,
    /// Model override; the provider's default model is used when `None`.
    pub model: Option<String>,
    pub credentials: CredentialConfig,
}

/// Asks open-ended questions of a chat-completion provider.
#[derive(Clone)]
pub struct ChatClient {
    transport: Transport,
}

impl ChatClient {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::with_http_client(registry, default_http_client())
    }

    pub fn with_http_client(registry: ProviderRegistry, http: Client) -> Self {
        Self {
            transport: Transport::new(registry, http),
        }
    }

    /// Records every answered question into `sink`.
    #[must_use]
    pub fn with_history(mut self, sink: Arc<dyn HistorySink>) -> Self {
        self.transport.set_history(sink);
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.transport.registry()
    }

    /// Asks a question and returns the lazy stream of answer fragments.
    ///
    /// Fails before any network I/O for unknown providers, translation-only
    /// providers, and missing credentials.
    pub async fn ask_fragments(
        &self,
        question: &str,
        options: &AskOptions,
    ) -> Result<FragmentStream, ProviderError> {
        let descriptor = self.transport.descriptor(&options.provider)?;
        if !descriptor.supports_chat() {
            return Err(ProviderError::unsupported_operation(descriptor));
        }

        let credential = resolve_credential(descriptor, &options.credentials)?;
        let spec = RequestSpec {
            provider: descriptor.id,
            kind: RequestKind::Chat,
            text: question.to_string(),
            model: model_for(descriptor, options.model.as_deref()),
            stream: true,
        };

        let response = self.transport.post_chat(descriptor, &credential, &spec).await?;

        Ok(self.transport.recording(
            decode_event_stream(response.bytes_stream()),
            EntryKind::Ask,
            descriptor.id,
            question,
        ))
    }

    /// Asks a question, passing each answer fragment to `on_chunk` as it
    /// arrives, and returns the full answer.
    pub async fn ask_stream<F>(
        &self,
        question: &str,
        options: &AskOptions,
        on_chunk: F,
    ) -> Result<String, ProviderError>
    where
        F: FnMut(&str),
    {
        let fragments = self.ask_fragments(question, options).await?;
        Ok(collect_fragments(fragments, on_chunk).await)
    }

    /// Asks a question and returns the full answer.
    pub async fn ask(&self, question: &str, options: &AskOptions) -> Result<String, ProviderError> {
        self.ask_stream(question, options, |_| {}).await
    }
}
