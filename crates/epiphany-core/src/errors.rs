use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using EpiphanyError
pub type Result<T> = std::result::Result<T, EpiphanyError>;

/// Canonical error type for registry construction and registration
///
/// All failures are load-time/definition-time and fatal: nothing is caught
/// or retried inside the registry. Each variant maps to a stable error code
/// via [`EpiphanyError::code`] for programmatic handling and tests.
#[derive(Debug, Error)]
pub enum EpiphanyError {
    // ===== Argument Validation Errors =====
    /// A registration call was made without a required argument
    #[error("{operation} requires {argument}")]
    MissingArgument {
        operation: &'static str,
        argument: &'static str,
    },

    /// A registration call referenced a config file that does not exist
    #[error("Type config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A type name is not a symbol-like identifier
    #[error("Invalid type name {name:?}: {reason}")]
    InvalidTypeName { name: String, reason: String },

    /// A callback-registered intent was given no required entities
    #[error("Intent {intent:?} must declare at least one required entity")]
    MissingRequiredEntities { intent: String },

    // ===== Schema Normalization Errors =====
    /// A required field was absent from the raw type data
    #[error("Missing field {field:?} in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    /// A field was present but had the wrong shape
    #[error("Invalid field {field:?}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A type file's top level was not a JSON object
    #[error("Invalid type file {}: {reason}", path.display())]
    InvalidTypeFile { path: PathBuf, reason: String },

    /// An intent file did not have exactly one wrapping key
    #[error("Invalid intent file {}: {reason}", path.display())]
    InvalidIntentFile { path: PathBuf, reason: String },

    // ===== I/O and Parse Errors =====
    /// Malformed JSON in a resolved type file (propagated unmodified)
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem error while reading a resolved type file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EpiphanyError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            EpiphanyError::MissingArgument { .. } => "ERR_MISSING_ARGUMENT",
            EpiphanyError::FileNotFound { .. } => "ERR_FILE_NOT_FOUND",
            EpiphanyError::InvalidTypeName { .. } => "ERR_INVALID_TYPE_NAME",
            EpiphanyError::MissingRequiredEntities { .. } => "ERR_MISSING_REQUIRED_ENTITIES",
            EpiphanyError::MissingField { .. } => "ERR_MISSING_FIELD",
            EpiphanyError::InvalidField { .. } => "ERR_INVALID_FIELD",
            EpiphanyError::InvalidTypeFile { .. } => "ERR_INVALID_TYPE_FILE",
            EpiphanyError::InvalidIntentFile { .. } => "ERR_INVALID_INTENT_FILE",
            EpiphanyError::Parse { .. } => "ERR_PARSE",
            EpiphanyError::Io { .. } => "ERR_IO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = EpiphanyError::MissingArgument {
            operation: "custom_entity",
            argument: "name",
        };
        assert_eq!(err.code(), "ERR_MISSING_ARGUMENT");

        let err = EpiphanyError::FileNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(err.code(), "ERR_FILE_NOT_FOUND");
    }

    #[test]
    fn test_error_messages_name_the_argument() {
        let err = EpiphanyError::MissingArgument {
            operation: "custom_entity",
            argument: "conf_filepath",
        };
        let msg = err.to_string();
        assert!(msg.contains("custom_entity"));
        assert!(msg.contains("conf_filepath"));
    }
}
