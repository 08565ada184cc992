//! List command
//!
//! Usage: epiphany list <entities|intents> [--root <DIR>]

use clap::{Args, Subcommand};
use std::path::PathBuf;

use epiphany_core::{SharedAnalyzerList, TypeRegistry};

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommand,
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// List default entity types
    Entities(TargetArgs),
    /// List default intent types
    Intents(TargetArgs),
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Schema root containing the lib/epiphany/ layout
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Execute list command
pub fn execute(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ListCommand::Entities(target) => execute_list_entities(target),
        ListCommand::Intents(target) => execute_list_intents(target),
    }
}

fn execute_list_entities(args: TargetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = TypeRegistry::new(args.root, SharedAnalyzerList::new());
    let entities = registry.default_entity_types(&[])?;
    println!("{}", serde_json::to_string_pretty(entities)?);
    Ok(())
}

fn execute_list_intents(args: TargetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = TypeRegistry::new(args.root, SharedAnalyzerList::new());
    let intents = registry.default_intent_types(&[])?;
    println!("{}", serde_json::to_string_pretty(intents)?);
    Ok(())
}
