//! Epiphany Core - schema registry for a natural-language tokenizer
//!
//! This crate loads, validates, and exposes the typed configuration records
//! the tokenizer's matching engine consumes:
//! - EntityType and IntentType schema records with boundary normalization
//! - Phrase expansion to singular/plural forms for matching
//! - Type file resolution over the conventional `lib/epiphany/` layout
//! - A registry object with file-based, custom, and callback registration
//!   plus memoized aggregation queries
//!
//! Tokenization and matching execution live outside this crate; the
//! [`CustomAnalyzer`] trait is the boundary callback-registered entity types
//! plug into.

pub mod errors;
pub mod loader;
pub mod logging_facility;
pub mod model;
pub mod registry;

// Re-export commonly used types
pub use errors::{EpiphanyError, Result};
pub use loader::TypeCategory;
pub use model::{
    AnalyzerHandle, CustomAnalyzer, EntityType, IntentType, SharedAnalyzerList,
    VALIDATION_CUSTOM_ANALYZER, VALIDATION_TEXT_MATCH,
};
pub use registry::TypeRegistry;
