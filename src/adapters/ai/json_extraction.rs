//! Tolerant JSON extraction from free-text model output.
//!
//! Models wrap their answers in prose, reasoning and one or more fenced
//! code blocks. Candidates are tried in priority order:
//!
//! 1. the last fenced block, fence markers stripped
//! 2. the outermost `{ ... }` slice of that block
//! 3. the outermost `{ ... }` slice of the whole text
//!
//! The first candidate that parses as JSON wins. If none does, extraction
//! fails; callers treat that as non-retryable.

use serde::de::DeserializeOwned;
use thiserror::Error;

const FENCE: &str = "```";

/// Why a response could not be turned into the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonExtractionError {
    /// No candidate in the text parsed as JSON.
    #[error("no JSON object found in response")]
    NotFound,

    /// JSON was found but did not match the expected schema.
    #[error("response JSON does not match schema: {0}")]
    Schema(String),
}

/// Returns the JSON text the response most likely intended as its answer.
pub fn extract_json(raw: &str) -> Result<&str, JsonExtractionError> {
    let fenced = fenced_blocks(raw).last().copied();

    let candidates = [
        fenced.map(str::trim),
        fenced.and_then(brace_slice),
        brace_slice(raw),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
        .ok_or(JsonExtractionError::NotFound)
}

/// Extracts and decodes a response into `T`.
pub fn parse_json_response<T: DeserializeOwned>(raw: &str) -> Result<T, JsonExtractionError> {
    let json = extract_json(raw)?;
    serde_json::from_str(json).map_err(|e| JsonExtractionError::Schema(e.to_string()))
}

/// Bodies of all fenced blocks, in order. An unclosed final fence runs to
/// the end of the text.
fn fenced_blocks(raw: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = raw;

    while let Some(open) = rest.find(FENCE) {
        let after = &rest[open + FENCE.len()..];
        let body = strip_language_tag(after);
        match body.find(FENCE) {
            Some(close) => {
                blocks.push(&body[..close]);
                rest = &body[close + FENCE.len()..];
            }
            None => {
                blocks.push(body);
                break;
            }
        }
    }

    blocks
}

/// Drops a ```json style tag line; leaves inline content untouched.
fn strip_language_tag(after_fence: &str) -> &str {
    match after_fence.find('\n') {
        Some(newline) => {
            let tag = after_fence[..newline].trim();
            let is_tag = tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+' || c == '_');
            if is_tag {
                &after_fence[newline + 1..]
            } else {
                after_fence
            }
        }
        None => after_fence,
    }
}

/// Substring from the first `{` to the last `}`, inclusive.
fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
