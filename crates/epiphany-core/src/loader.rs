//! Type file resolution and parsing
//!
//! Resolves a type category (entity or intent) plus an optional name filter to
//! a set of JSON files under the conventional `lib/epiphany/<category>/`
//! directory, and parses each into raw key/value data. Malformed JSON is
//! fatal; requesting a named file that does not exist silently contributes
//! nothing (documented gap, not an error).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::errors::{EpiphanyError, Result};

/// Conventional directory prefix for type config files
pub const TYPE_DIR_PREFIX: &str = "lib/epiphany";

/// Category of type config files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// Entity definitions under `lib/epiphany/entity_types/`
    EntityTypes,
    /// Intent definitions under `lib/epiphany/intent_types/`
    IntentTypes,
}

impl TypeCategory {
    /// Directory name for this category
    pub fn dir_name(&self) -> &'static str {
        match self {
            TypeCategory::EntityTypes => "entity_types",
            TypeCategory::IntentTypes => "intent_types",
        }
    }
}

/// Conventional directory for a category under the given root
pub fn category_dir(root: &Path, category: TypeCategory) -> PathBuf {
    root.join(TYPE_DIR_PREFIX).join(category.dir_name())
}

/// Resolve a category and name filter to a set of type file paths
///
/// With zero or one name there is no explicit filter: every `*.json` file in
/// the conventional directory is resolved, sorted for determinism; a missing
/// directory yields an empty set. With more than one name, exactly
/// `<name>.json` is resolved per name, and names without a corresponding file
/// are silently skipped.
///
/// # Errors
/// Returns `Io` only for directory read failures other than the directory
/// being absent.
pub fn resolve_type_files(
    root: &Path,
    category: TypeCategory,
    names: &[&str],
) -> Result<Vec<PathBuf>> {
    let dir = category_dir(root, category);

    if names.len() > 1 {
        let files = names
            .iter()
            .map(|name| dir.join(format!("{}.json", name)))
            .filter(|path| path.is_file())
            .collect();
        return Ok(files);
    }

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(EpiphanyError::Io { path: dir, source: e }),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    // Sorted for determinism
    files.sort();
    Ok(files)
}

/// Read a type file and parse it into a raw JSON object
///
/// # Errors
/// * `Io` - the file cannot be read
/// * `Parse` - malformed JSON (propagated unmodified from the parser)
/// * `InvalidTypeFile` - the top level is not a JSON object
pub fn read_type_file(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| EpiphanyError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| EpiphanyError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(EpiphanyError::InvalidTypeFile {
            path: path.to_path_buf(),
            reason: format!("expected a top-level object, got {}", other),
        }),
    }
}

/// Unwrap an intent file's single-key envelope
///
/// Intent files are wrapped: exactly one top-level key (the intent name)
/// whose value is an object of intent fields. The nested fields are flattened
/// to the top level and a `type` field equal to the wrapping key is injected,
/// overriding any nested `type`. Entity files are not wrapped; this
/// transformation is required for intents, not incidental.
///
/// # Errors
/// * `InvalidIntentFile` - zero or multiple top-level keys, or a non-object value
pub fn unwrap_intent_file(path: &Path, wrapped: Map<String, Value>) -> Result<Map<String, Value>> {
    if wrapped.len() != 1 {
        return Err(EpiphanyError::InvalidIntentFile {
            path: path.to_path_buf(),
            reason: format!("expected exactly one wrapping key, got {}", wrapped.len()),
        });
    }

    // len() == 1 checked above
    let (name, value) = wrapped.into_iter().next().ok_or_else(|| {
        EpiphanyError::InvalidIntentFile {
            path: path.to_path_buf(),
            reason: "expected exactly one wrapping key, got 0".to_string(),
        }
    })?;

    let mut fields = match value {
        Value::Object(map) => map,
        other => {
            return Err(EpiphanyError::InvalidIntentFile {
                path: path.to_path_buf(),
                reason: format!("intent {:?} must map to an object, got {}", name, other),
            })
        }
    };

    fields.insert("type".to_string(), Value::String(name));
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrapped(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    #[test]
    fn test_unwrap_intent_file_flattens_and_injects_type() {
        let path = Path::new("intent_types/book_flight.json");
        let data = wrapped(json!({
            "book_flight": { "required_entities": ["origin"] }
        }));

        let fields = unwrap_intent_file(path, data).unwrap();
        assert_eq!(fields.get("type"), Some(&json!("book_flight")));
        assert_eq!(fields.get("required_entities"), Some(&json!(["origin"])));
    }

    #[test]
    fn test_unwrap_intent_file_rejects_multiple_keys() {
        let path = Path::new("intent_types/bad.json");
        let data = wrapped(json!({ "a": {}, "b": {} }));

        let err = unwrap_intent_file(path, data).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_INTENT_FILE");
    }

    #[test]
    fn test_unwrap_intent_file_rejects_non_object_value() {
        let path = Path::new("intent_types/bad.json");
        let data = wrapped(json!({ "book_flight": ["origin"] }));

        let err = unwrap_intent_file(path, data).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_INTENT_FILE");
    }

    #[test]
    fn test_wrapping_key_overrides_nested_type() {
        let path = Path::new("intent_types/book_flight.json");
        let data = wrapped(json!({
            "book_flight": { "type": "something_else" }
        }));

        let fields = unwrap_intent_file(path, data).unwrap();
        assert_eq!(fields.get("type"), Some(&json!("book_flight")));
    }
}
