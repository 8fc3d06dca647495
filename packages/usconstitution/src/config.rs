//! Configuration constants and validation functions.

use crate::error::{ConstitutionError, Result};

/// Path prefix used for the Constitution Annotated site.
///
/// `cleanpath()` renders every provision under this prefix.
pub const DEFAULT_PATH_PREFIX: &str = "/constitution-conan";

/// Heading rendered for the document root.
pub const DEFAULT_HEADING: &str = "US Constitution";

/// Citation rendered for the document root.
pub const DEFAULT_CITATION: &str = "U.S. Const.";

/// Maximum accepted JSON document size in bytes (4 MB).
///
/// The full annotated document is well under 1 MB.
pub const MAX_DOCUMENT_SIZE: usize = 4 * 1024 * 1024;

/// Text wrap width for provision text printed by the CLI.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Validate a path prefix.
///
/// Any string is accepted except one ending in `/`, which would double the
/// separator in every child path.
///
/// # Examples
/// ```
/// use usconstitution::config::validate_path_prefix;
///
/// assert!(validate_path_prefix("").is_ok());
/// assert!(validate_path_prefix("/constitution-conan").is_ok());
/// assert!(validate_path_prefix("https://example.com/conan").is_ok());
/// assert!(validate_path_prefix("/constitution/").is_err());
/// ```
pub fn validate_path_prefix(prefix: &str) -> Result<()> {
    if prefix.ends_with('/') {
        return Err(ConstitutionError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Options applied by the loader when constructing the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Prefix stored as the root's `path_prefix`.
    pub prefix: String,

    /// Fold nested clause lists into their parent clause's prose.
    pub flatten_clauses: bool,
}

impl LoadOptions {
    /// Options with the given path prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Set whether nested clause lists are flattened.
    #[must_use]
    pub fn with_flatten_clauses(mut self, flatten: bool) -> Self {
        self.flatten_clauses = flatten;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            flatten_clauses: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_prefix_valid() {
        assert!(validate_path_prefix("").is_ok());
        assert!(validate_path_prefix(DEFAULT_PATH_PREFIX).is_ok());
        assert!(validate_path_prefix("/const").is_ok());
        assert!(validate_path_prefix("/docs/v1.2/constitution_annotated").is_ok());
        assert!(validate_path_prefix("/Constitution").is_ok());
        assert!(validate_path_prefix("https://example.com/conan").is_ok());
        assert!(validate_path_prefix("constitution").is_ok());
        assert!(validate_path_prefix("/with space").is_ok());
    }

    #[test]
    fn test_validate_path_prefix_invalid() {
        assert!(validate_path_prefix("/").is_err());
        assert!(validate_path_prefix("/constitution/").is_err());
        assert!(validate_path_prefix("https://example.com/").is_err());
    }

    #[test]
    fn test_load_options_default_flattens() {
        let options = LoadOptions::default();
        assert!(options.prefix.is_empty());
        assert!(options.flatten_clauses);
    }

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::with_prefix("/const").with_flatten_clauses(false);
        assert_eq!(options.prefix, "/const");
        assert!(!options.flatten_clauses);
    }
}
