//! Error types for the constitution model.
//!
//! A single `ConstitutionError` covers the core (schema validation, loc-id
//! parsing) and the thin collaborators around it (file loading, export).

use thiserror::Error;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum ConstitutionError {
    /// The input document does not match the expected schema.
    ///
    /// Raised for missing or mistyped fields, sibling indices that do not
    /// match list position, foreign keys that disagree with the owning
    /// parent, and mutually exclusive fields that are both populated.
    #[error("Schema error at {path}: {message}")]
    Schema { path: String, message: String },

    /// A loc-id could not be parsed.
    #[error("Could not parse loc-id '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// A well-formed loc-id names a provision the document does not have.
    #[error("No provision found for loc-id '{0}'")]
    NotFound(String),

    /// Path prefix supplied at load time ends with a separator.
    #[error("Invalid path prefix: '{0}'. Must not end with '/' (e.g., /constitution-conan)")]
    InvalidPrefix(String),

    /// Document exceeds the loader's size limit.
    #[error("Document exceeds maximum size ({size} bytes, max {max})")]
    DocumentTooLarge { size: usize, max: usize },

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConstitutionError {
    /// Build a schema error for a location in the document.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a parse error for a loc-id.
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from loc-id parsing.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Whether this error came from schema validation.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ConstitutionError>;
