use std::path::Path;
use std::sync::OnceLock;

use inflector::Inflector;
use serde::Serialize;
use serde_json::{Map, Value};

use super::analyzer::AnalyzerHandle;
use super::{optional_string, resolve_type_name, string_list};
use crate::errors::{EpiphanyError, Result};

/// Validation strategy tag for phrase-list entity types
pub const VALIDATION_TEXT_MATCH: &str = "text_match";

/// Validation strategy tag for callback-registered entity types
pub const VALIDATION_CUSTOM_ANALYZER: &str = "custom_analyzer";

/// EntityType - a named span of meaning the tokenizer can recognize
///
/// An EntityType describes one category of phrase/span (e.g. a metric or a
/// weighted-lift reference) together with the literal phrases used to match
/// it. Instances are immutable: all fields are private, set once during
/// construction, and exposed through accessors only.
#[derive(Debug, Clone, Serialize)]
pub struct EntityType {
    /// Non-empty identifier (explicit field, or inferred from the source filename)
    #[serde(rename = "type")]
    type_name: String,

    /// Classification tag driving the downstream matching strategy
    validation_type: String,

    /// Literal phrases used for matching (creation order preserved)
    known_phrases: Vec<String>,

    /// Names of entity types that must co-occur with this one
    required_entities: Vec<String>,

    /// Capability handle, set only for callback-registered entities
    #[serde(skip)]
    custom_analyzer: Option<AnalyzerHandle>,

    /// Memoized result of phrase expansion
    #[serde(skip)]
    expanded_phrases: OnceLock<Vec<String>>,
}

impl EntityType {
    /// Create an EntityType with the given name and validation type
    ///
    /// Programmatic construction path; file-based construction goes through
    /// [`EntityType::from_raw`]. Phrase and entity lists start empty and are
    /// supplied with the `with_*` builders before first use.
    pub fn new(type_name: impl Into<String>, validation_type: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            validation_type: validation_type.into(),
            known_phrases: Vec::new(),
            required_entities: Vec::new(),
            custom_analyzer: None,
            expanded_phrases: OnceLock::new(),
        }
    }

    /// Set the known phrases
    pub fn with_known_phrases(mut self, known_phrases: Vec<String>) -> Self {
        self.known_phrases = known_phrases;
        self
    }

    /// Set the required co-occurring entity type names
    pub fn with_required_entities(mut self, required_entities: Vec<String>) -> Self {
        self.required_entities = required_entities;
        self
    }

    /// Attach a custom analyzer capability handle
    pub fn with_custom_analyzer(mut self, analyzer: AnalyzerHandle) -> Self {
        self.custom_analyzer = Some(analyzer);
        self
    }

    /// Normalize raw type data into an EntityType
    ///
    /// This is the single parsing step at the boundary: arbitrary raw
    /// key/value data comes in, a typed record or a structured field error
    /// comes out. The `type` field resolves to the explicit value when
    /// present, else the source filename's stem. `validation_type` is
    /// required. Phrase and entity lists default to empty.
    ///
    /// # Errors
    /// * `MissingField` - no `type` resolvable, or `validation_type` absent
    /// * `InvalidField` - a field is present with the wrong JSON shape
    pub fn from_raw(raw: &Map<String, Value>, source: Option<&Path>) -> Result<Self> {
        let type_name = resolve_type_name(raw, source)?;
        let validation_type = optional_string(raw, "validation_type")?.ok_or_else(|| {
            EpiphanyError::MissingField {
                field: "validation_type",
                context: source
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| format!("entity type {:?}", type_name)),
            }
        })?;

        Ok(Self {
            type_name,
            validation_type,
            known_phrases: string_list(raw, "known_phrases")?,
            required_entities: string_list(raw, "required_entities")?,
            custom_analyzer: None,
            expanded_phrases: OnceLock::new(),
        })
    }

    /// The entity type's identifier
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The validation strategy tag
    pub fn validation_type(&self) -> &str {
        &self.validation_type
    }

    /// Literal phrases used for matching, in creation order
    pub fn known_phrases(&self) -> &[String] {
        &self.known_phrases
    }

    /// Entity type names that must co-occur
    pub fn required_entities(&self) -> &[String] {
        &self.required_entities
    }

    /// Capability handle for callback-registered entities
    pub fn custom_analyzer(&self) -> Option<&AnalyzerHandle> {
        self.custom_analyzer.as_ref()
    }

    /// Check whether this entity type uses plain text matching
    pub fn is_text_match(&self) -> bool {
        self.validation_type == VALIDATION_TEXT_MATCH
    }

    /// Expand known phrases into their matchable forms (memoized)
    ///
    /// Each phrase is lower-cased, then expanded to the triple
    /// {singular form, lower-cased original, plural form} using standard
    /// English inflection rules. The triples are flattened, empties dropped,
    /// and duplicates removed in first-seen order. Semantically a set:
    /// `["Run"]` expands to `{"run", "runs"}` because the singular form
    /// collides with the lower-cased original.
    pub fn phrases_for_validation(&self) -> &[String] {
        self.expanded_phrases.get_or_init(|| {
            let mut expanded = Vec::new();
            for phrase in &self.known_phrases {
                let lowered = phrase.to_lowercase();
                if lowered.is_empty() {
                    continue;
                }
                let forms = [lowered.to_singular(), lowered.clone(), lowered.to_plural()];
                for form in forms {
                    if form.is_empty() || expanded.contains(&form) {
                        continue;
                    }
                    expanded.push(form);
                }
            }
            expanded
        })
    }
}

// Semantic equality only; the memoized phrase cache is derived state.
impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.validation_type == other.validation_type
            && self.known_phrases == other.known_phrases
            && self.required_entities == other.required_entities
            && self.custom_analyzer == other.custom_analyzer
    }
}
