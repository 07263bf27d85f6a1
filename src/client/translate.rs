use reqwest::Client;
use std::sync::Arc;

use super::transport::Transport;
use super::{FragmentStream, default_http_client, model_for};
use crate::error::ProviderError;
use crate::history::{EntryKind, HistorySink};
use crate::provider::{
    CredentialConfig, ProviderDescriptor, ProviderId, ProviderRegistry, resolve_credential,
};
use crate::translation::{RequestKind, RequestSpec, decode_event_stream};

/// Options for one translation.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Provider id, e.g. `google` or `deepseek`.
    pub provider: String,
    /// Source language code, or `auto`.
    pub source_lang: String,
    pub target_lang: String,
    /// Model override; the provider's default model is used when `None`.
    pub model: Option<String>,
    pub credentials: CredentialConfig,
}

impl TranslateOptions {
    fn request_spec(&self, descriptor: &ProviderDescriptor, text: &str, stream: bool) -> RequestSpec {
        RequestSpec {
            provider: descriptor.id,
            kind: RequestKind::Translate {
                source_lang: self.source_lang.clone(),
                target_lang: self.target_lang.clone(),
            },
            text: text.to_string(),
            model: model_for(descriptor, self.model.as_deref()),
            stream,
        }
    }
}

/// Translates text through any registered provider.
#[derive(Clone)]
pub struct TranslationClient {
    transport: Transport,
}

impl TranslationClient {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::with_http_client(registry, default_http_client())
    }

    pub fn with_http_client(registry: ProviderRegistry, http: Client) -> Self {
        Self {
            transport: Transport::new(registry, http),
        }
    }

    /// Records every successful translation into `sink`.
    #[must_use]
    pub fn with_history(mut self, sink: Arc<dyn HistorySink>) -> Self {
        self.transport.set_history(sink);
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.transport.registry()
    }

    /// Translates `text` and returns the complete translation.
    pub async fn translate(
        &self,
        text: &str,
        options: &TranslateOptions,
    ) -> Result<String, ProviderError> {
        let descriptor = self.transport.descriptor(&options.provider)?;

        let translated = match descriptor.id {
            ProviderId::Google => {
                self.transport
                    .free_translate(descriptor, text, &options.source_lang, &options.target_lang)
                    .await?
            }
            ProviderId::DeepSeek | ProviderId::Qwen | ProviderId::OpenAi => {
                let credential = resolve_credential(descriptor, &options.credentials)?;
                let spec = options.request_spec(descriptor, text, false);
                let response = self.transport.post_chat(descriptor, &credential, &spec).await?;
                Transport::read_completion(descriptor, response).await?
            }
        };

        let translated = translated.trim();
        if translated.is_empty() {
            return Err(ProviderError::empty_result(descriptor));
        }

        self.transport
            .record(EntryKind::Translate, descriptor.id, text, translated);
        Ok(translated.to_string())
    }

    /// Translates `text`, yielding the translation as it is generated.
    ///
    /// Chat providers stream their answer; the free provider yields the whole
    /// translation as a single fragment.
    pub async fn translate_stream(
        &self,
        text: &str,
        options: &TranslateOptions,
    ) -> Result<FragmentStream, ProviderError> {
        let descriptor = self.transport.descriptor(&options.provider)?;

        match descriptor.id {
            ProviderId::Google => {
                let translated = self.translate(text, options).await?;
                Ok(Box::pin(futures_util::stream::iter([translated])))
            }
            ProviderId::DeepSeek | ProviderId::Qwen | ProviderId::OpenAi => {
                let credential = resolve_credential(descriptor, &options.credentials)?;
                let spec = options.request_spec(descriptor, text, true);
                let response = self.transport.post_chat(descriptor, &credential, &spec).await?;

                Ok(self.transport.recording(
                    decode_event_stream(response.bytes_stream()),
                    EntryKind::Translate,
                    descriptor.id,
                    text,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_spec_uses_default_model() {
        let registry = ProviderRegistry::builtin();
        let options = TranslateOptions {
            provider: "qwen".to_string(),
            source_lang: "auto".to_string(),
            target_lang: "en".to_string(),
            model: None,
            credentials: CredentialConfig::default(),
        };

        let spec = options.request_spec(registry.get(ProviderId::Qwen), "你好", true);
        assert_eq!(spec.model, "qwen-plus");
        assert!(spec.stream);
        assert_eq!(
            spec.kind,
            RequestKind::Translate {
                source_lang: "auto".to_string(),
                target_lang: "en".to_string(),
            }
        );
    }

    #[test]
    fn test_request_spec_model_override() {
        let registry = ProviderRegistry::builtin();
        let options = TranslateOptions {
            provider: "openai".to_string(),
            source_lang: "en".to_string(),
            target_lang: "fr".to_string(),
            model: Some("gpt-4o".to_string()),
            credentials: CredentialConfig::default(),
        };

        let spec = options.request_spec(registry.get(ProviderId::OpenAi), "hi", false);
        assert_eq!(spec.model, "gpt-4o");
    }
}
