//! Response envelope normalization
//!
//! The chat API has answered with several envelope shapes over time: a
//! top-level `answer`, a bare JSON string, and workflow-style nested results.

use serde_json::Value;

use crate::utils::error::ExtractError;

type Shape = fn(&Value) -> Option<&str>;

/// Envelope shapes, tried in order
const SHAPES: &[(&str, Shape)] = &[
    ("direct", direct_field),
    ("string", bare_string),
    ("nested", nested_field),
];

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn direct_field(envelope: &Value) -> Option<&str> {
    ["answer", "text"]
        .iter()
        .find_map(|key| non_empty(envelope.get(*key).and_then(Value::as_str)))
}

fn bare_string(envelope: &Value) -> Option<&str> {
    non_empty(envelope.as_str())
}

fn nested_field(envelope: &Value) -> Option<&str> {
    [
        "/result/answer",
        "/result/text",
        "/data/outputs/text",
        "/data/outputs/answer",
    ]
    .iter()
    .find_map(|pointer| non_empty(envelope.pointer(pointer).and_then(Value::as_str)))
}

/// Extract the document text from an upstream envelope
///
/// # Errors
///
/// Returns [`ExtractError::NoContent`] when no known shape carries text.
pub fn normalize(envelope: &Value) -> Result<&str, ExtractError> {
    for (name, shape) in SHAPES {
        if let Some(text) = shape(envelope) {
            tracing::debug!(shape = *name, length = text.len(), "Normalized response envelope");
            return Ok(text);
        }
    }

    tracing::warn!("Upstream envelope carried no text");
    Err(ExtractError::NoContent)
}
