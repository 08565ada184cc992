use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use epiphany_core::{CustomAnalyzer, SharedAnalyzerList, TypeRegistry};
use tempfile::TempDir;

/// Create a temp schema root with the conventional `lib/epiphany/` layout
#[allow(dead_code)]
pub fn schema_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("lib/epiphany/entity_types")).unwrap();
    fs::create_dir_all(dir.path().join("lib/epiphany/intent_types")).unwrap();
    dir
}

/// Write an entity type file into the conventional entity directory
#[allow(dead_code)]
pub fn write_entity_file(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root
        .join("lib/epiphany/entity_types")
        .join(format!("{}.json", name));
    fs::write(&path, content).unwrap();
    path
}

/// Write an intent type file into the conventional intent directory
#[allow(dead_code)]
pub fn write_intent_file(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root
        .join("lib/epiphany/intent_types")
        .join(format!("{}.json", name));
    fs::write(&path, content).unwrap();
    path
}

/// Write a config file outside the conventional layout
///
/// For `custom_entity` / `custom_intent` paths that must not be picked up by
/// the default loaders.
#[allow(dead_code)]
pub fn write_conf_file(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join(format!("{}.json", name));
    fs::write(&path, content).unwrap();
    path
}

/// Create a registry over the given root with a fresh shared analyzer list
#[allow(dead_code)]
pub fn new_registry(root: &Path) -> TypeRegistry {
    TypeRegistry::new(root, SharedAnalyzerList::new())
}

/// Minimal analyzer capability for registration tests
#[allow(dead_code)]
pub struct FakeAnalyzer {
    name: String,
}

#[allow(dead_code)]
impl FakeAnalyzer {
    pub fn shared(name: &str) -> Arc<dyn CustomAnalyzer> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

impl CustomAnalyzer for FakeAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }
}
