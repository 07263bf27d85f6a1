//! Request payloads for chat-completion providers.

use serde::Serialize;
use std::borrow::Cow;

use super::prompt::{ASK_PROMPT, ASK_TEMPERATURE, TRANSLATE_TEMPERATURE, build_translate_prompt};
use crate::provider::ProviderId;

/// What a request asks the provider to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Translate {
        source_lang: String,
        target_lang: String,
    },
    Chat,
}

/// A fully resolved request, ready to be shaped into a provider payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub provider: ProviderId,
    pub kind: RequestKind,
    /// Source text for translations, the question for chat.
    pub text: String,
    pub model: String,
    pub stream: bool,
}

impl RequestSpec {
    /// Builds the chat-completions body for this request.
    pub fn to_chat_completion(&self) -> ChatCompletionRequest<'_> {
        let (system_prompt, temperature) = match &self.kind {
            RequestKind::Translate {
                source_lang,
                target_lang,
            } => (
                Cow::Owned(build_translate_prompt(source_lang, target_lang)),
                TRANSLATE_TEMPERATURE,
            ),
            RequestKind::Chat => (Cow::Borrowed(ASK_PROMPT), ASK_TEMPERATURE),
        };

        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(&self.text),
                },
            ],
            temperature,
            stream: self.stream,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message<'a>>,
    pub temperature: f32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: Cow<'a, str>,
}
