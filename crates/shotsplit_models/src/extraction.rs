//! Tolerant parsing of collaborator message content.
//!
//! Models asked for bare JSON still sometimes wrap it in a markdown code
//! fence. The fence is stripped before parsing; anything else that is not a
//! JSON object is rejected.

use serde_json::Value;
use shotsplit_error::{CollaboratorError, CollaboratorErrorKind, CollaboratorResult};

/// Longest snippet of a response body or message kept in an error.
pub const SNIPPET_LIMIT: usize = 1000;

/// Truncate `text` to [`SNIPPET_LIMIT`] chars, marking the cut.
///
/// # Examples
///
/// ```
/// use shotsplit_models::{SNIPPET_LIMIT, truncate_snippet};
///
/// assert_eq!(truncate_snippet("short"), "short");
/// let long = "错".repeat(SNIPPET_LIMIT + 1);
/// assert!(truncate_snippet(&long).ends_with("...(truncated)"));
/// ```
pub fn truncate_snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_LIMIT) {
        Some((cut, _)) => format!("{}...(truncated)", &text[..cut]),
        None => text.to_string(),
    }
}

/// Strip a surrounding markdown code fence, if there is one.
///
/// # Examples
///
/// ```
/// use shotsplit_models::unwrap_code_fence;
///
/// assert_eq!(unwrap_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(unwrap_code_fence("  {\"a\":1} "), "{\"a\":1}");
/// ```
pub fn unwrap_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse message content as a JSON object.
///
/// # Errors
///
/// Returns [`CollaboratorErrorKind::Content`] when the content is not valid
/// JSON or is valid JSON of another type.
pub fn parse_json_object(content: &str) -> CollaboratorResult<Value> {
    let rejected = |reason: String| {
        CollaboratorError::new(CollaboratorErrorKind::Content {
            reason,
            snippet: truncate_snippet(content),
        })
    };

    let value: Value =
        serde_json::from_str(unwrap_code_fence(content)).map_err(|e| rejected(e.to_string()))?;
    if !value.is_object() {
        return Err(rejected(format!("found {}", json_type(&value))));
    }
    Ok(value)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
