use futures_util::{Stream, StreamExt};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::sync::Arc;

use super::FragmentStream;
use crate::error::{NetworkCode, ProviderError};
use crate::history::{EntryKind, HistoryEntry, HistorySink, record_best_effort};
use crate::provider::{Credential, ProviderDescriptor, ProviderId, ProviderRegistry};
use crate::translation::{RequestSpec, google};

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// HTTP plumbing shared by the translation and chat clients.
#[derive(Clone)]
pub(crate) struct Transport {
    http: Client,
    registry: Arc<ProviderRegistry>,
    history: Option<Arc<dyn HistorySink>>,
}

impl Transport {
    pub(crate) fn new(registry: ProviderRegistry, http: Client) -> Self {
        Self {
            http,
            registry: Arc::new(registry),
            history: None,
        }
    }

    pub(crate) fn set_history(&mut self, sink: Arc<dyn HistorySink>) {
        self.history = Some(sink);
    }

    pub(crate) fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub(crate) fn descriptor(&self, provider: &str) -> Result<&ProviderDescriptor, ProviderError> {
        self.registry.lookup(provider)
    }

    /// Sends a chat-completions request and checks the status.
    pub(crate) async fn post_chat(
        &self,
        descriptor: &ProviderDescriptor,
        credential: &Credential,
        spec: &RequestSpec,
    ) -> Result<Response, ProviderError> {
        let url = descriptor.chat_completions_url();
        let body = spec.to_chat_completion();
        tracing::debug!(
            provider = %descriptor.id,
            model = %spec.model,
            stream = spec.stream,
            "POST {url}"
        );

        let mut request = self.http.post(&url).json(&body);
        if !credential.is_empty() {
            request = request.bearer_auth(credential.expose());
        }
        if spec.stream {
            request = request.header(reqwest::header::ACCEPT, "text/event-stream");
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(descriptor, &e))?;

        ensure_success(descriptor, response).await
    }

    /// Reads a non-streaming completion and returns the message content.
    pub(crate) async fn read_completion(
        descriptor: &ProviderDescriptor,
        response: Response,
    ) -> Result<String, ProviderError> {
        let body = read_body(descriptor, response).await?;

        let completion: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("unparseable completion from {}: {e}", descriptor.id);
            ProviderError::empty_result(descriptor)
        })?;

        Ok(completion
            .choices
            .into_iter()
            .find_map(|c| c.message.and_then(|m| m.content))
            .unwrap_or_default())
    }

    /// Translates through the free endpoint.
    pub(crate) async fn free_translate(
        &self,
        descriptor: &ProviderDescriptor,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}{}", descriptor.base_url, google::TRANSLATE_PATH);
        tracing::debug!(provider = %descriptor.id, "GET {url} ({source_lang} -> {target_lang})");

        let response = self
            .http
            .get(&url)
            .query(&google::query_params(text, source_lang, target_lang))
            .send()
            .await
            .map_err(|e| transport_error(descriptor, &e))?;

        let response = ensure_success(descriptor, response).await?;
        let body = read_body(descriptor, response).await?;

        google::parse_translation(&body).ok_or_else(|| {
            tracing::debug!("unexpected response shape from {}", descriptor.id);
            ProviderError::empty_result(descriptor)
        })
    }

    /// Records a finished call, ignoring failures.
    pub(crate) fn record(&self, kind: EntryKind, provider: ProviderId, input: &str, output: &str) {
        record_best_effort(
            self.history.as_deref(),
            &HistoryEntry {
                kind,
                provider,
                input,
                output,
            },
        );
    }

    /// Wraps a fragment stream so the full output is recorded once it ends.
    pub(crate) fn recording<S>(
        &self,
        fragments: S,
        kind: EntryKind,
        provider: ProviderId,
        input: &str,
    ) -> FragmentStream
    where
        S: Stream<Item = String> + Send + 'static,
    {
        let history = self.history.clone();
        let input = input.to_string();

        Box::pin(async_stream::stream! {
            let mut fragments = std::pin::pin!(fragments);
            let mut output = String::new();

            while let Some(fragment) = fragments.next().await {
                output.push_str(&fragment);
                yield fragment;
            }

            let output = output.trim();
            if !output.is_empty() {
                record_best_effort(
                    history.as_deref(),
                    &HistoryEntry { kind, provider, input: &input, output },
                );
            }
        })
    }
}

fn transport_error(descriptor: &ProviderDescriptor, err: &reqwest::Error) -> ProviderError {
    tracing::debug!("request to {} failed: {err:?}", descriptor.host());
    ProviderError::from_transport(descriptor, err)
}

async fn ensure_success(
    descriptor: &ProviderDescriptor,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    tracing::debug!(provider = %descriptor.id, "response status {status}");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::from_http_status(
        descriptor,
        status.as_u16(),
        &body,
    ))
}

async fn read_body(
    descriptor: &ProviderDescriptor,
    response: Response,
) -> Result<String, ProviderError> {
    response.text().await.map_err(|e| {
        tracing::debug!("failed to read body from {}: {e}", descriptor.host());
        ProviderError::from_network_code(descriptor, NetworkCode::BodyUnavailable)
    })
}
