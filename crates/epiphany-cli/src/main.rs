//! Epiphany CLI
//!
//! Command-line interface for inspecting and validating tokenizer schema
//! directories.

use clap::{Parser, Subcommand};
use epiphany_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "epiphany")]
#[command(about = "Epiphany - tokenizer type schema registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List registered default types as JSON
    List(commands::list::ListArgs),
    /// Load and validate every default type file
    Check(commands::check::CheckArgs),
}

fn main() {
    init(Profile::Development);
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(args),
        Commands::Check(args) => commands::check::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
