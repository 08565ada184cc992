//! Check command
//!
//! Usage: epiphany check [--root <DIR>]
//!
//! Loads every default entity and intent file and fails on the first invalid
//! one, mirroring what tokenizer boot would do.

use clap::Args;
use std::path::PathBuf;

use epiphany_core::{SharedAnalyzerList, TypeRegistry};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Schema root containing the lib/epiphany/ layout
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Execute check command
pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = TypeRegistry::new(args.root, SharedAnalyzerList::new());

    let entity_count = registry.default_entity_types(&[])?.len();
    let intent_count = registry.default_intent_types(&[])?.len();

    println!(
        "✓ {} entity types, {} intent types",
        entity_count, intent_count
    );
    Ok(())
}
