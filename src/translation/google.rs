//! Query format of Google's free `translate_a/single` endpoint.
//!
//! The endpoint takes the text and language codes as query parameters and
//! answers with nested arrays: `[[["translated", "source", ...], ...], ...]`.
//! The first element of every inner segment is a piece of the translation.

use serde_json::Value;

pub const TRANSLATE_PATH: &str = "/translate_a/single";

/// Query parameters for one translation.
pub fn query_params<'a>(
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
) -> [(&'static str, &'a str); 5] {
    [
        ("client", "gtx"),
        ("sl", google_code(source_lang)),
        ("tl", google_code(target_lang)),
        ("dt", "t"),
        ("q", text),
    ]
}

/// Google expects a region for Simplified Chinese.
fn google_code(code: &str) -> &str {
    match code {
        "zh" => "zh-CN",
        other => other,
    }
}

/// Joins the translated segments of a response body.
///
/// Returns `None` when the body does not have the expected shape.
pub fn parse_translation(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let segments = value.get(0)?.as_array()?;

    Some(
        segments
            .iter()
            .filter_map(|segment| segment.get(0)?.as_str())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let params = query_params("hello", "en", "zh");
        assert!(params.contains(&("sl", "en")));
        assert!(params.contains(&("tl", "zh-CN")));
        assert!(params.contains(&("q", "hello")));
        assert!(params.contains(&("client", "gtx")));
    }

    #[test]
    fn test_auto_and_traditional_chinese_untouched() {
        let params = query_params("hi", "auto", "zh-TW");
        assert!(params.contains(&("sl", "auto")));
        assert!(params.contains(&("tl", "zh-TW")));
    }

    #[test]
    fn test_parse_single_segment() {
        let body = r#"[[["你好","hello",null,null,10]],null,"en"]"#;
        assert_eq!(parse_translation(body), Some("你好".to_string()));
    }

    #[test]
    fn test_parse_multiple_segments() {
        let body = r#"[[["Bonjour. ","Hello. ",null,null,3],["Comment ça va ?","How are you?",null,null,3]],null,"en"]"#;
        assert_eq!(
            parse_translation(body),
            Some("Bonjour. Comment ça va ?".to_string())
        );
    }

    #[test]
    fn test_parse_unexpected_shape() {
        assert_eq!(parse_translation("<html>blocked</html>"), None);
        assert_eq!(parse_translation(r#"{"error":"nope"}"#), None);
        assert_eq!(parse_translation("[null]"), None);
    }
}
