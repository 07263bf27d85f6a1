//! Language codes understood by every provider.

use anyhow::Result;

use crate::ui::Style;

/// Pseudo-code asking the backend to detect the source language.
pub const AUTO_DETECT: &str = "auto";

/// Supported language codes (ISO 639-1, plus `zh-TW`) and their English names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// Returns the English name for a language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes"));
    println!(
        "  {:5} {}",
        Style::code(AUTO_DETECT),
        Style::secondary("Detect automatically (source only)")
    );
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates a target language code.
pub fn validate_language(lang: &str) -> Result<()> {
    if language_name(lang).is_some() {
        Ok(())
    } else {
        anyhow::bail!(
            "Invalid language code: '{lang}'\n\n\
             Valid language codes: en, zh, ja, ko, fr, de, es, ...\n\
             Run 'lingo languages' to see all supported codes."
        )
    }
}

/// Validates a source language code, which may also be `auto`.
pub fn validate_source_language(lang: &str) -> Result<()> {
    if lang == AUTO_DETECT {
        return Ok(());
    }
    validate_language(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_valid() {
        assert!(validate_language("zh").is_ok());
        assert!(validate_language("en").is_ok());
        assert!(validate_language("zh-TW").is_ok());
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("klingon").is_err());
        assert!(validate_language("").is_err());
        assert!(validate_language("EN").is_err());
        assert!(validate_language(AUTO_DETECT).is_err());
    }

    #[test]
    fn test_source_language_accepts_auto() {
        assert!(validate_source_language(AUTO_DETECT).is_ok());
        assert!(validate_source_language("ja").is_ok());
        assert!(validate_source_language("xx").is_err());
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("ja"), Some("Japanese"));
        assert_eq!(language_name("zh"), Some("Chinese (Simplified)"));
        assert_eq!(language_name("auto"), None);
    }
}
