//! The type registry
//!
//! An explicit registry object owning all registration entry points
//! (file-based defaults, file-based customs, programmatic callbacks) and the
//! memoized aggregation queries the tokenizer consumes. Each memoized
//! collection is computed once on first access and cached for the registry's
//! lifetime; registration is expected to finish before query traffic begins,
//! and caches are never invalidated afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{EpiphanyError, Result};
use crate::loader::{self, TypeCategory};
use crate::model::{
    AnalyzerHandle, CustomAnalyzer, EntityType, IntentType, SharedAnalyzerList,
    VALIDATION_CUSTOM_ANALYZER,
};

/// Registry of entity and intent types for one tokenizer configuration
///
/// Constructed once with a schema root directory and a handle to the shared
/// custom-analyzer list, then populated through the registration methods.
/// Custom maps are BTreeMaps so aggregated views have a deterministic order.
#[derive(Debug)]
pub struct TypeRegistry {
    /// Directory containing the conventional `lib/epiphany/` layout
    root: PathBuf,

    /// Shared, process-wide analyzer list (external to this registry)
    analyzers: SharedAnalyzerList,

    /// Entity types registered programmatically, by name
    custom_entity_types: BTreeMap<String, EntityType>,

    /// Intents registered via file or callback, by name
    custom_intents: BTreeMap<String, IntentType>,

    // Memoized collections, computed once on first access
    default_entities: Option<Vec<EntityType>>,
    default_intents: Option<Vec<IntentType>>,
    all_entities: Option<Vec<EntityType>>,
    text_match_entities: Option<Vec<EntityType>>,
    analyzer_entities: Option<Vec<EntityType>>,
    merged_intents: Option<Vec<IntentType>>,
}

impl TypeRegistry {
    /// Create a registry rooted at the given working directory
    ///
    /// `analyzers` is the shared custom-analyzer list owned by the caller;
    /// file-based `custom_entity` registration appends there rather than to
    /// the per-registry custom map.
    pub fn new(root: impl Into<PathBuf>, analyzers: SharedAnalyzerList) -> Self {
        Self {
            root: root.into(),
            analyzers,
            custom_entity_types: BTreeMap::new(),
            custom_intents: BTreeMap::new(),
            default_entities: None,
            default_intents: None,
            all_entities: None,
            text_match_entities: None,
            analyzer_entities: None,
            merged_intents: None,
        }
    }

    /// The schema root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Handle to the shared analyzer list this registry appends to
    pub fn analyzers(&self) -> &SharedAnalyzerList {
        &self.analyzers
    }

    // ===== File-based default registration =====

    /// Load the default entity types (memoized)
    ///
    /// With zero or one name, every `*.json` file in the conventional entity
    /// directory is loaded; with more, exactly `<name>.json` per name, missing
    /// names silently skipped. The first call fixes the result: repeat calls
    /// return the cached sequence regardless of arguments.
    ///
    /// # Errors
    /// * `Io` / `Parse` - unreadable or malformed type file (fatal)
    /// * `MissingField` / `InvalidField` - a file fails normalization
    pub fn default_entity_types(&mut self, names: &[&str]) -> Result<&[EntityType]> {
        if self.default_entities.is_none() {
            let files = loader::resolve_type_files(&self.root, TypeCategory::EntityTypes, names)?;
            let mut entities = Vec::with_capacity(files.len());
            for path in &files {
                let raw = loader::read_type_file(path)?;
                entities.push(EntityType::from_raw(&raw, Some(path))?);
            }
            tracing::debug!(count = entities.len(), "loaded default entity types");
            self.default_entities = Some(entities);
        }
        Ok(self.default_entities.as_deref().unwrap_or_default())
    }

    /// Load the default intent types (memoized)
    ///
    /// Same resolution and memoization contract as
    /// [`default_entity_types`](Self::default_entity_types). Each intent file
    /// is unwrapped: its single top-level key becomes the canonical intent
    /// name, the nested fields are flattened, and `type` is injected.
    ///
    /// # Errors
    /// * `Io` / `Parse` - unreadable or malformed type file (fatal)
    /// * `InvalidIntentFile` - a file is not a single-key envelope
    pub fn default_intent_types(&mut self, names: &[&str]) -> Result<&[IntentType]> {
        if self.default_intents.is_none() {
            let files = loader::resolve_type_files(&self.root, TypeCategory::IntentTypes, names)?;
            let mut intents = Vec::with_capacity(files.len());
            for path in &files {
                let wrapped = loader::read_type_file(path)?;
                let fields = loader::unwrap_intent_file(path, wrapped)?;
                intents.push(IntentType::from_raw(&fields, Some(path))?);
            }
            tracing::debug!(count = intents.len(), "loaded default intent types");
            self.default_intents = Some(intents);
        }
        Ok(self.default_intents.as_deref().unwrap_or_default())
    }

    // ===== File-based custom registration =====

    /// Register a custom entity type from a config file
    ///
    /// Reads the file, injects `type = name`, and appends the resulting
    /// EntityType to the shared analyzer list - not to this registry's custom
    /// map, so it does not appear in [`all_entity_types`](Self::all_entity_types).
    ///
    /// # Errors
    /// * `MissingArgument` - empty name or empty path
    /// * `FileNotFound` - the config file does not exist
    /// * `Io` / `Parse` / `MissingField` / `InvalidField` - file fails to load
    pub fn custom_entity(&mut self, name: &str, conf_filepath: &Path) -> Result<()> {
        require_args("custom_entity", name, conf_filepath)?;

        let mut raw = loader::read_type_file(conf_filepath)?;
        raw.insert("type".to_string(), Value::String(name.to_string()));
        let entity = EntityType::from_raw(&raw, Some(conf_filepath))?;

        tracing::info!(entity = name, "registered custom entity analyzer");
        self.analyzers.push(entity);
        Ok(())
    }

    /// Register a custom intent from a config file
    ///
    /// Applies the same single-key unwrap transformation as default intent
    /// loading (the wrapping key supplies `type`), then stores the IntentType
    /// in this registry's custom intents map under `name`.
    ///
    /// # Errors
    /// * `MissingArgument` - empty name or empty path
    /// * `FileNotFound` - the config file does not exist
    /// * `Io` / `Parse` / `InvalidIntentFile` - file fails to load
    pub fn custom_intent(&mut self, name: &str, conf_filepath: &Path) -> Result<()> {
        require_args("custom_intent", name, conf_filepath)?;

        let wrapped = loader::read_type_file(conf_filepath)?;
        let fields = loader::unwrap_intent_file(conf_filepath, wrapped)?;
        let intent = IntentType::from_raw(&fields, Some(conf_filepath))?;

        tracing::info!(intent = name, "registered custom intent");
        self.custom_intents.insert(name.to_string(), intent);
        Ok(())
    }

    // ===== Programmatic registration =====

    /// Register an entity type backed by a custom analyzer capability
    ///
    /// No file I/O: synthesizes `type = entity_name` and
    /// `validation_type = "custom_analyzer"` and stores the EntityType in
    /// this registry's custom map. The analyzer argument being a
    /// `dyn CustomAnalyzer` trait object is what the original's
    /// direct-subclass check guaranteed.
    ///
    /// # Errors
    /// * `MissingArgument` - empty entity name
    /// * `InvalidTypeName` - entity name is not a symbol-like identifier
    pub fn custom_entity_type_and_analyzer(
        &mut self,
        entity_name: &str,
        custom_analyzer: Arc<dyn CustomAnalyzer>,
        known_phrases: Vec<String>,
        required_entities: Vec<String>,
    ) -> Result<()> {
        require_symbol_like("custom_entity_type_and_analyzer", "entity_name", entity_name)?;

        let entity = EntityType::new(entity_name, VALIDATION_CUSTOM_ANALYZER)
            .with_known_phrases(known_phrases)
            .with_required_entities(required_entities)
            .with_custom_analyzer(AnalyzerHandle::new(custom_analyzer));

        tracing::info!(entity = entity_name, "registered custom analyzer entity type");
        self.custom_entity_types
            .insert(entity_name.to_string(), entity);
        Ok(())
    }

    /// Register an intent type by callback
    ///
    /// Synthesizes `type = intent_name` and stores the IntentType in this
    /// registry's custom intents map.
    ///
    /// # Errors
    /// * `MissingArgument` - empty intent name
    /// * `InvalidTypeName` - intent name is not a symbol-like identifier
    /// * `MissingRequiredEntities` - no required entities were given
    pub fn custom_intent_type_by_callback(
        &mut self,
        intent_name: &str,
        required_entities: Vec<String>,
        optional_entities: Vec<String>,
        keywords_boost: Vec<String>,
    ) -> Result<()> {
        require_symbol_like("custom_intent_type_by_callback", "intent_name", intent_name)?;
        if required_entities.is_empty() {
            return Err(EpiphanyError::MissingRequiredEntities {
                intent: intent_name.to_string(),
            });
        }

        let mut intent = IntentType::new(intent_name);
        intent.required_entities = required_entities;
        intent.optional_entities = optional_entities;
        intent.keywords_boost = keywords_boost;

        tracing::info!(intent = intent_name, "registered callback intent type");
        self.custom_intents.insert(intent_name.to_string(), intent);
        Ok(())
    }

    // ===== Aggregation queries (memoized) =====

    /// All entity types: defaults followed by programmatic customs (memoized)
    ///
    /// File-based customs registered via [`custom_entity`](Self::custom_entity)
    /// are excluded - they live in the shared analyzer list. No deduplication
    /// is performed across the two sources.
    ///
    /// # Errors
    /// Propagates default-loading failures on the first call.
    pub fn all_entity_types(&mut self) -> Result<&[EntityType]> {
        if self.all_entities.is_none() {
            let mut all = self.default_entity_types(&[])?.to_vec();
            all.extend(self.custom_entity_types.values().cloned());
            self.all_entities = Some(all);
        }
        Ok(self.all_entities.as_deref().unwrap_or_default())
    }

    /// Entity types validated by plain text matching (memoized)
    ///
    /// # Errors
    /// Propagates default-loading failures on the first call.
    pub fn text_match_entity_types(&mut self) -> Result<&[EntityType]> {
        if self.text_match_entities.is_none() {
            let subset: Vec<EntityType> = self
                .all_entity_types()?
                .iter()
                .filter(|entity| entity.is_text_match())
                .cloned()
                .collect();
            self.text_match_entities = Some(subset);
        }
        Ok(self.text_match_entities.as_deref().unwrap_or_default())
    }

    /// Entity types registered with a custom analyzer capability (memoized)
    pub fn custom_analyzer_entity_types(&mut self) -> &[EntityType] {
        if self.analyzer_entities.is_none() {
            self.analyzer_entities = Some(self.custom_entity_types.values().cloned().collect());
        }
        self.analyzer_entities.as_deref().unwrap_or_default()
    }

    /// All intent types: defaults unioned with customs (memoized)
    ///
    /// Set union by value, default-first: custom intents equal to an already
    /// present default are collapsed rather than repeated.
    ///
    /// # Errors
    /// Propagates default-loading failures on the first call.
    pub fn intent_types(&mut self) -> Result<&[IntentType]> {
        if self.merged_intents.is_none() {
            let mut merged = self.default_intent_types(&[])?.to_vec();
            for intent in self.custom_intents.values() {
                if !merged.contains(intent) {
                    merged.push(intent.clone());
                }
            }
            self.merged_intents = Some(merged);
        }
        Ok(self.merged_intents.as_deref().unwrap_or_default())
    }
}

/// Validate the two required arguments of file-based custom registration
///
/// Distinguishes the three failure cases: missing name, missing path, and
/// file not found.
fn require_args(operation: &'static str, name: &str, conf_filepath: &Path) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EpiphanyError::MissingArgument {
            operation,
            argument: "name",
        });
    }
    if conf_filepath.as_os_str().is_empty() {
        return Err(EpiphanyError::MissingArgument {
            operation,
            argument: "conf_filepath",
        });
    }
    if !conf_filepath.is_file() {
        return Err(EpiphanyError::FileNotFound {
            path: conf_filepath.to_path_buf(),
        });
    }
    Ok(())
}

/// Validate that a programmatically supplied name is a symbol-like identifier
fn require_symbol_like(
    operation: &'static str,
    argument: &'static str,
    name: &str,
) -> Result<()> {
    if name.is_empty() {
        return Err(EpiphanyError::MissingArgument {
            operation,
            argument,
        });
    }
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(EpiphanyError::InvalidTypeName {
            name: name.to_string(),
            reason: "must contain only word characters".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_symbol_like_accepts_identifiers() {
        assert!(require_symbol_like("op", "name", "weight_lift").is_ok());
        assert!(require_symbol_like("op", "name", "metric2").is_ok());
    }

    #[test]
    fn test_require_symbol_like_rejects_spaces_and_empty() {
        let err = require_symbol_like("op", "name", "weight lift").unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_TYPE_NAME");

        let err = require_symbol_like("op", "name", "").unwrap_err();
        assert_eq!(err.code(), "ERR_MISSING_ARGUMENT");
    }
}
