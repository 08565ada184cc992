//! Typed schema records for the tokenizer registry
//!
//! Two value objects with a deliberate asymmetry:
//! - [`EntityType`] is a true immutable value type (private fields, accessors)
//! - [`IntentType`] is a mutable record (public fields)
//!
//! Both are produced from raw JSON maps by a single normalization step at the
//! boundary (`from_raw`); nothing downstream re-parses raw data.

pub mod analyzer;
pub mod entity_type;
pub mod intent_type;

pub use analyzer::{AnalyzerHandle, CustomAnalyzer, SharedAnalyzerList};
pub use entity_type::{EntityType, VALIDATION_CUSTOM_ANALYZER, VALIDATION_TEXT_MATCH};
pub use intent_type::IntentType;

use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::{EpiphanyError, Result};

/// Infer a type name from a source file path
///
/// Takes the trailing run of word characters immediately preceding a literal
/// `.json` suffix, so `entity_types/weight-lift.json` yields `lift` and
/// `entity_types/exercise.json` yields `exercise`. Returns None when the path
/// has no `.json` suffix or no word characters before it.
pub(crate) fn type_name_from_path(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(".json")?;
    let start = stem
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    let tail = &stem[start..];
    if tail.is_empty() {
        None
    } else {
        Some(tail.to_string())
    }
}

/// Extract an optional string field from raw type data
pub(crate) fn optional_string(raw: &Map<String, Value>, field: &'static str) -> Result<Option<String>> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(EpiphanyError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a string, got {}", json_kind(other)),
        }),
    }
}

/// Extract an optional list-of-strings field from raw type data
///
/// A missing or null field normalizes to an empty list.
pub(crate) fn string_list(raw: &Map<String, Value>, field: &'static str) -> Result<Vec<String>> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(EpiphanyError::InvalidField {
                    field: field.to_string(),
                    reason: format!("expected an array of strings, got {}", json_kind(other)),
                }),
            })
            .collect(),
        Some(other) => Err(EpiphanyError::InvalidField {
            field: field.to_string(),
            reason: format!("expected an array of strings, got {}", json_kind(other)),
        }),
    }
}

/// Resolve the `type` field: explicit value first, filename stem second
pub(crate) fn resolve_type_name(
    raw: &Map<String, Value>,
    source: Option<&Path>,
) -> Result<String> {
    if let Some(explicit) = optional_string(raw, "type")? {
        return Ok(explicit);
    }
    if let Some(inferred) = source.and_then(type_name_from_path) {
        return Ok(inferred);
    }
    Err(EpiphanyError::MissingField {
        field: "type",
        context: source
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "raw type data".to_string()),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
