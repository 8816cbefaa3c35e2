//! Cleanup of raw model text.

use serde_json::Value;

use crate::errors::{GeminiError, GeminiResult};

/// Strip markdown code fences the model tends to wrap JSON in, then trim.
pub fn clean(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse model text that is supposed to be a JSON document.
pub fn parse_structured(text: &str) -> GeminiResult<Value> {
    serde_json::from_str(&clean(text)).map_err(GeminiError::MalformedOutput)
}
