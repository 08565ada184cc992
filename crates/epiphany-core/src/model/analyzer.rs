use std::fmt;
use std::sync::{Arc, RwLock};

use super::entity_type::EntityType;

/// Base capability for callback-registered entity analyzers
///
/// The analysis itself lives outside this crate: the tokenizer's matching
/// engine invokes the analyzer for entity types whose `validation_type` is
/// `"custom_analyzer"`. The registry only needs a stable name to identify
/// the capability and carry it on the EntityType record.
pub trait CustomAnalyzer: Send + Sync {
    /// Stable identifier for this analyzer
    fn name(&self) -> &str;
}

/// Cloneable handle to a registered custom analyzer
///
/// Wraps the trait object so EntityType stays `Debug` and comparable.
/// Two handles are equal when their analyzers report the same name.
#[derive(Clone)]
pub struct AnalyzerHandle(Arc<dyn CustomAnalyzer>);

impl AnalyzerHandle {
    pub fn new(analyzer: Arc<dyn CustomAnalyzer>) -> Self {
        Self(analyzer)
    }

    /// Name of the underlying analyzer
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Access the underlying capability
    pub fn analyzer(&self) -> &Arc<dyn CustomAnalyzer> {
        &self.0
    }
}

impl fmt::Debug for AnalyzerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnalyzerHandle").field(&self.name()).finish()
    }
}

impl PartialEq for AnalyzerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

/// Shared, process-wide list of custom-analyzer entity types
///
/// This is the storage target for file-based `custom_entity` registration.
/// It is deliberately external to the registry: the registry holds a clone
/// of the handle and appends to it, but the list is owned by whatever owns
/// configuration lifecycle (typically the tokenizer boot path). Clones share
/// the same underlying list.
#[derive(Debug, Clone, Default)]
pub struct SharedAnalyzerList {
    inner: Arc<RwLock<Vec<EntityType>>>,
}

impl SharedAnalyzerList {
    /// Create a new empty analyzer list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity type to the shared list
    pub fn push(&self, entity: EntityType) {
        let mut entities = match self.inner.write() {
            Ok(guard) => guard,
            // Poisoning only means another writer panicked mid-push;
            // the list itself is still a valid Vec.
            Err(poisoned) => poisoned.into_inner(),
        };
        entities.push(entity);
    }

    /// Snapshot the current contents of the list
    pub fn snapshot(&self) -> Vec<EntityType> {
        let entities = match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entities.clone()
    }

    /// Number of registered analyzer entity types
    pub fn len(&self) -> usize {
        match self.inner.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Check whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
