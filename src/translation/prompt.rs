use super::language::{AUTO_DETECT, language_name};

pub const TRANSLATE_PROMPT_TEMPLATE: &str = "You are a professional translator. \
     Translate the user's text from {source_language} to {target_language}. \
     Return only the translation, with no explanation.";

pub const ASK_PROMPT: &str = "You are a helpful assistant. \
     Answer in the same language as the question unless asked otherwise.";

/// Sampling temperature for translations; kept low to limit creative drift.
pub const TRANSLATE_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for open-ended questions.
pub const ASK_TEMPERATURE: f32 = 0.7;

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_translate_prompt(source_lang: &str, target_lang: &str) -> String {
    // {source_language} / {target_language} are placeholders, not format args
    TRANSLATE_PROMPT_TEMPLATE
        .replace("{source_language}", &display_name(source_lang))
        .replace("{target_language}", &display_name(target_lang))
}

fn display_name(code: &str) -> String {
    if code == AUTO_DETECT {
        return "the detected source language".to_string();
    }
    language_name(code).map_or_else(|| code.to_string(), str::to_string)
}
