//! Error types for the store registry.

use thiserror::Error;

/// Errors that can occur while configuring the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An object type or class name is empty or contains invalid characters.
    #[error("Invalid name '{0}': must be non-empty and contain only alphanumeric characters, underscores, or hyphens")]
    InvalidName(String),

    /// A store class with the same name is already registered.
    #[error("Store class '{0}' already registered")]
    DuplicateClass(String),

    /// The configured fallback separator is not a single character.
    #[error("Invalid fallback separator '{0}': must be exactly one character")]
    InvalidSeparator(String),

    /// The configured namespace is empty.
    #[error("Namespace must not be empty")]
    EmptyNamespace,
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::InvalidName("bad name!".to_string());
        assert!(err.to_string().contains("bad name!"));

        let err = RegistryError::DuplicateClass("BookmarkDataStore".to_string());
        assert!(err.to_string().contains("BookmarkDataStore"));
        assert!(err.to_string().contains("already registered"));

        let err = RegistryError::InvalidSeparator("--".to_string());
        assert!(err.to_string().contains("exactly one character"));
    }
}
