//! Clients that tie provider lookup, credentials, request shaping, and
//! response decoding together.

use futures_util::Stream;
use std::pin::Pin;
use std::time::Duration;

use crate::provider::ProviderDescriptor;

mod chat;
mod translate;
mod transport;

pub use chat::{AskOptions, ChatClient};
pub use translate::{TranslateOptions, TranslationClient};

/// Lazy, forward-only sequence of text fragments.
pub type FragmentStream = Pin<Box<dyn Stream<Item = String> + Send>>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}

fn model_for(descriptor: &ProviderDescriptor, model_override: Option<&str>) -> String {
    model_override
        .or(descriptor.default_model.as_deref())
        .unwrap_or_default()
        .to_string()
}
