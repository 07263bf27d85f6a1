//! Request shaping and response decoding for translation and chat.

pub mod google;
mod language;
mod prompt;
mod request;
mod sse_parser;

pub use language::{
    AUTO_DETECT, SUPPORTED_LANGUAGES, language_name, print_languages, validate_language,
    validate_source_language,
};
pub use prompt::{ASK_PROMPT, build_translate_prompt};
pub use request::{ChatCompletionRequest, Message, RequestKind, RequestSpec};
pub use sse_parser::{DONE_SENTINEL, EventStreamDecoder, collect_fragments, decode_event_stream};
