//! Recovers JSON from completion text that may be wrapped in a Markdown
//! code fence.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::error;

use crate::errors::StudyError;

const FENCE: &str = "```";

/// Strips a leading code-fence opener and a trailing closing fence. A word
/// after the opener is a language tag only when whitespace follows it, so
/// "```42```" keeps its body. Text without an opener is only trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    static FENCE_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^```(?:[A-Za-z][A-Za-z0-9_+-]*(?:\s|$))?").expect("static regex compile")
    });

    let trimmed = text.trim();
    let Some(open) = FENCE_OPEN_RE.find(trimmed) else {
        return trimmed;
    };

    let body = &trimmed[open.end()..];
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Parses completion text into JSON, reporting why it could not.
///
/// # Errors
///
/// `StudyError::EmptyResponse` when there is no text, `StudyError::Parse` when
/// the unfenced text is not valid JSON.
pub fn try_parse_ai_json(text: Option<&str>) -> Result<Value, StudyError> {
    let text = text.ok_or(StudyError::EmptyResponse)?;
    let clean = strip_code_fence(text);
    if clean.is_empty() {
        return Err(StudyError::EmptyResponse);
    }

    serde_json::from_str(clean).map_err(|e| {
        error!(text = %clean, "Failed to parse JSON: {}", e);
        StudyError::Parse(e.to_string())
    })
}

/// Lenient variant of [`try_parse_ai_json`]: failures are logged and
/// collapsed to `None`.
#[must_use]
pub fn parse_ai_json(text: Option<&str>) -> Option<Value> {
    try_parse_ai_json(text).ok()
}
