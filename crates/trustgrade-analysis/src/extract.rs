//! Pulls the first complete JSON object out of free-form task output.
//!
//! Model output is unreliable about code fences and commentary, so the
//! object is located with a brace-depth scan instead of parsing the whole
//! string. The scan tracks string literals so braces inside quoted values
//! do not close the object early.

use serde_json::{Map, Value};

use crate::error::ExtractionError;

/// Literal fence tokens removed before scanning. Order matters: the tagged
/// openers must go before the bare backticks.
const FENCE_TOKENS: &[&str] = &["```json", "```JSON", "```"];

/// Extracts and parses the first balanced top-level JSON object in `raw`.
///
/// # Errors
///
/// - [`ExtractionError::NoJsonFound`] when the text has no `{`.
/// - [`ExtractionError::UnbalancedBraces`] when the object never closes.
/// - [`ExtractionError::InvalidJson`] when the delimited text is not valid JSON.
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, ExtractionError> {
    let cleaned = strip_code_fences(raw);
    let start = cleaned.find('{').ok_or(ExtractionError::NoJsonFound)?;
    let candidate = &cleaned[start..];
    let end = find_object_end(candidate).ok_or(ExtractionError::UnbalancedBraces)?;

    serde_json::from_str(&candidate[..=end])
        .map_err(|e| ExtractionError::InvalidJson(e.to_string()))
}

fn strip_code_fences(raw: &str) -> String {
    FENCE_TOKENS
        .iter()
        .fold(raw.to_string(), |text, token| text.replace(token, ""))
}

/// Byte offset of the `}` that closes the object opening at `text[0]`.
fn find_object_end(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in text.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
