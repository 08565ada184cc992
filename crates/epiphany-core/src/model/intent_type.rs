use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{resolve_type_name, string_list};
use crate::errors::Result;

/// IntentType - a named user-intent composed of entity types and keyword boosts
///
/// Unlike [`EntityType`](super::EntityType), this is a plain mutable record:
/// fields stay public and adjustable after construction. The asymmetry is
/// deliberate and should not be unified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentType {
    /// Intent identifier (the wrapping key of the intent file, or the filename stem)
    #[serde(rename = "type")]
    pub type_name: String,

    /// Entity type names that must be present for this intent to match
    #[serde(default)]
    pub required_entities: Vec<String>,

    /// Entity type names that refine the intent when present
    #[serde(default)]
    pub optional_entities: Vec<String>,

    /// Keywords that boost this intent's score during matching
    #[serde(default)]
    pub keywords_boost: Vec<String>,
}

impl IntentType {
    /// Create an IntentType with the given name and empty entity lists
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            required_entities: Vec::new(),
            optional_entities: Vec::new(),
            keywords_boost: Vec::new(),
        }
    }

    /// Normalize raw type data into an IntentType
    ///
    /// Same boundary contract as `EntityType::from_raw`: the `type` field
    /// resolves to the explicit value when present, else the source filename's
    /// stem; list fields default to empty.
    ///
    /// # Errors
    /// * `MissingField` - no `type` resolvable from data or source path
    /// * `InvalidField` - a list field is present with the wrong JSON shape
    pub fn from_raw(raw: &Map<String, Value>, source: Option<&Path>) -> Result<Self> {
        Ok(Self {
            type_name: resolve_type_name(raw, source)?,
            required_entities: string_list(raw, "required_entities")?,
            optional_entities: string_list(raw, "optional_entities")?,
            keywords_boost: string_list(raw, "keywords_boost")?,
        })
    }
}
