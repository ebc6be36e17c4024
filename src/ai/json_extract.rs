//! # JSON Extraction
//!
//! Model answers are asked to be bare JSON but may still arrive wrapped in a
//! markdown fence or preceded by prose. This module finds the JSON part
//! and decodes it.

use crate::errors::AiError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

lazy_static! {
    static ref FENCED_BLOCK_REGEX: Regex =
        Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").expect("Fenced block pattern should be valid");
}

/// Byte index just past the bracket that closes the one at `start`
///
/// Brackets inside JSON strings (including escaped quotes) are not counted.
/// `None` when the text ends before the span closes.
pub fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    match bytes.get(start) {
        Some(b'{') | Some(b'[') => {}
        _ => return None,
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// The JSON text inside a model answer, if any
///
/// A fenced block wins; otherwise the first balanced `{...}` or `[...]` span.
///
/// ```rust
/// use kondate::ai::json_extract::extract_json_text;
///
/// let answer = "Here you go:\n{\"rate\": 18} hope it helps";
/// assert_eq!(extract_json_text(answer), Some("{\"rate\": 18}"));
///
/// let fenced = "```json\n[1, 2]\n```";
/// assert_eq!(extract_json_text(fenced), Some("[1, 2]"));
/// ```
pub fn extract_json_text(text: &str) -> Option<&str> {
    if let Some(inner) = FENCED_BLOCK_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| !inner.is_empty())
    {
        return Some(inner);
    }

    text.char_indices()
        .filter(|(_, c)| *c == '{' || *c == '[')
        .find_map(|(start, _)| balanced_end(text, start).map(|end| &text[start..end]))
}

/// Decode the JSON contained in a model answer
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let json = extract_json_text(text)
        .ok_or_else(|| AiError::MalformedJson("no JSON object or array in response".to_string()))?;

    serde_json::from_str(json).map_err(AiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"note {"name": "a } b", "q": "\"{"} trailing"#;
        let json = extract_json_text(text).unwrap();
        let value: Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["name"], "a } b");
    }

    #[test]
    fn test_nested_arrays_and_objects() {
        let text = r#"{"monday": ["recipe-1"], "x": {"y": [{}]}}"#;
        assert_eq!(extract_json_text(text), Some(text));
    }

    #[test]
    fn test_unbalanced_is_none() {
        assert_eq!(extract_json_text(r#"{"rate": 1"#), None);
        assert_eq!(balanced_end("abc", 0), None);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_json::<Value>("   "), Err(AiError::EmptyResponse));
        assert!(matches!(
            decode_json::<Value>("no json here"),
            Err(AiError::MalformedJson(_))
        ));
        assert!(matches!(
            decode_json::<Value>("{rate: 1}"),
            Err(AiError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_decode_fenced_with_prose() {
        let text = "以下が結果です。\n```json\n{\"suggestions\": [\"1丁\"]}\n```\n";
        let value: Value = decode_json(text).unwrap();
        assert_eq!(value["suggestions"][0], "1丁");
    }
}
