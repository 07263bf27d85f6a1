use anyhow::Result;

use crate::cli::{BackendArgs, GlobalArgs, UsageError};
use crate::client::{TranslateOptions, TranslationClient};
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::error::ProviderError;
use crate::input::InputReader;
use crate::provider::ProviderRegistry;
use crate::translation::{validate_language, validate_source_language};
use crate::ui::Spinner;

use super::{history_sink, print_stream};

pub struct TranslateArgs {
    pub text: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub backend: BackendArgs,
    pub global: GlobalArgs,
}

pub async fn run_translate(args: TranslateArgs) -> Result<()> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let resolved = resolve_config(
        &ResolveOptions {
            provider: args.backend.provider,
            from: args.from,
            to: args.to,
            model: args.backend.model,
        },
        &config_file,
    )?;

    validate_source_language(&resolved.source_lang).map_err(|e| UsageError::wrap(&e))?;
    if let Some(to) = &resolved.target_lang {
        validate_language(to).map_err(|e| UsageError::wrap(&e))?;
    }

    let text = InputReader::read(&args.text)?;
    let target_lang = resolved
        .target_lang
        .unwrap_or_else(|| default_target_for(&text).to_string());

    tracing::debug!(
        provider = %resolved.provider,
        from = %resolved.source_lang,
        to = %target_lang,
        "translating {} chars",
        text.chars().count()
    );

    let mut client = TranslationClient::new(ProviderRegistry::builtin());
    if let Some(sink) = history_sink(args.global.no_history) {
        client = client.with_history(sink);
    }

    let options = TranslateOptions {
        provider: resolved.provider.as_str().to_string(),
        source_lang: resolved.source_lang,
        target_lang,
        model: resolved.model,
        credentials: resolved.credentials,
    };

    let spinner = Spinner::new("Translating...", !args.global.quiet);
    let fragments = client.translate_stream(&text, &options).await?;
    let translated = print_stream(fragments, &spinner).await?;

    if translated.is_empty() {
        return Err(ProviderError::empty_result(client.registry().get(resolved.provider)).into());
    }

    Ok(())
}

/// Picks a target language when none is configured: English for text that
/// contains CJK characters, Chinese otherwise.
pub fn default_target_for(text: &str) -> &'static str {
    if text.chars().any(is_cjk) { "en" } else { "zh" }
}

const fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30ff}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{ac00}'..='\u{d7af}'
            | '\u{f900}'..='\u{faff}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_for_latin_text() {
        assert_eq!(default_target_for("good morning"), "zh");
        assert_eq!(default_target_for("Grüß Gott"), "zh");
    }

    #[test]
    fn test_default_target_for_cjk_text() {
        assert_eq!(default_target_for("你好"), "en");
        assert_eq!(default_target_for("こんにちは"), "en");
        assert_eq!(default_target_for("안녕하세요"), "en");
        assert_eq!(default_target_for("hello 世界"), "en");
    }
}
