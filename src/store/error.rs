//! Error types for data store resolution and store operations.

use thiserror::Error;

/// Why a resolution was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// Neither the object type nor its parent type has a registry entry.
    UnknownObjectType,

    /// The entry names a class that is not in the store catalog.
    UnknownClass(String),

    /// A live instance was supplied whose type is not a data store.
    NotADataStore(String),
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::UnknownObjectType => write!(f, "no data store registered"),
            InvalidReason::UnknownClass(name) => {
                write!(f, "class '{}' is not a registered data store", name)
            }
            InvalidReason::NotADataStore(type_name) => {
                write!(f, "'{}' does not implement the data store contract", type_name)
            }
        }
    }
}

/// Errors raised while resolving a data store or running an operation on one.
///
/// Resolution only ever fails with [`DataStoreError::InvalidDataStore`]. The
/// remaining variants are produced by forwarding or by store implementations.
///
/// # Example
///
/// ```
/// use dsk::store::{DataStoreError, InvalidReason};
///
/// let err = DataStoreError::invalid("nonexistent", InvalidReason::UnknownObjectType);
/// assert!(err.is_invalid_data_store());
/// assert!(err.to_string().contains("nonexistent"));
/// ```
#[derive(Debug, Error)]
pub enum DataStoreError {
    /// The object type could not be resolved to a valid data store.
    #[error("Invalid data store for '{object_type}': {reason}")]
    InvalidDataStore {
        /// Object type that was requested.
        object_type: String,
        /// What went wrong.
        reason: InvalidReason,
    },

    /// A forwarded method is not declared by the bound store class.
    #[error("Method '{method}' not found on data store {class_name}")]
    MethodNotFound {
        /// Class bound to the resolver.
        class_name: String,
        /// Method that was requested.
        method: String,
    },

    /// The backend has no object with this id.
    #[error("No {object_type} found with id {id}")]
    NotFound {
        /// Object type of the lookup.
        object_type: String,
        /// Id that was looked up.
        id: u64,
    },

    /// The object passed to the backend is unusable (e.g. missing id).
    #[error("Invalid object data: {0}")]
    InvalidData(String),

    /// Arguments to an operation were rejected.
    #[error("Invalid arguments for {method}: {message}")]
    InvalidArguments {
        /// Operation or method name.
        method: String,
        /// Description of the problem.
        message: String,
    },

    /// Generic backend failure.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Snapshot encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DataStoreError {
    /// Create an InvalidDataStore error.
    pub fn invalid(object_type: impl Into<String>, reason: InvalidReason) -> Self {
        Self::InvalidDataStore {
            object_type: object_type.into(),
            reason,
        }
    }

    /// Create a MethodNotFound error.
    pub fn method_not_found(class_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            class_name: class_name.into(),
            method: method.into(),
        }
    }

    /// Create a NotFound error.
    pub fn not_found(object_type: impl Into<String>, id: u64) -> Self {
        Self::NotFound {
            object_type: object_type.into(),
            id,
        }
    }

    /// Create an InvalidArguments error.
    pub fn invalid_arguments(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Whether this is a resolution failure.
    pub fn is_invalid_data_store(&self) -> bool {
        matches!(self, Self::InvalidDataStore { .. })
    }
}

impl From<serde_json::Error> for DataStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for data store operations.
pub type DsResult<T> = Result<T, DataStoreError>;
