//! Heuristics that turn free-form model output into response fields.
//!
//! Kept apart from the handlers so either rule can be replaced on its own.

use crate::generation::prompts::MAX_SUGGESTIONS;

/// One question per non-blank line, trimmed, in original order.
/// No numbering or punctuation is checked.
pub fn split_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the first `[ ... ]` substring: the first `[` through the first `]`
/// after it. Nested arrays are not supported.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let len = text[start..].find(']')?;
    Some(&text[start..=start + len])
}

/// Soft-fail parse of autocomplete output: anything unusable yields an empty list.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    let Some(array) = extract_json_array(text) else {
        tracing::warn!("No JSON array found in autocomplete response");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(array) {
        Ok(names) => names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .take(MAX_SUGGESTIONS)
            .collect(),
        Err(e) => {
            tracing::warn!("Autocomplete array did not parse: {e}");
            Vec::new()
        }
    }
}
