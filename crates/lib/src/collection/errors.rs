//! Error types for the collection wrapper.

use thiserror::Error;

/// Structured error types for [`super::Collection`] operations.
///
/// These are shape contract violations: the caller demanded a specific kind
/// of value and the data holds another. Missing data is never an error.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// A collection can only wrap an object or an array
    #[error("Collection root must be an object or an array, found {type_name}")]
    NotAContainer { type_name: String },

    /// A value exists at the path but it is not an array
    #[error("Path \"{path}\" exists but it's not an array")]
    NotAnArray { path: String },

    /// The value at the path is not a function
    #[error("Value of path \"{path}\" is not a function")]
    NotAFunction { path: String },
}

impl CollectionError {
    /// Check if this error is a shape mismatch.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            CollectionError::NotAContainer { .. }
                | CollectionError::NotAnArray { .. }
                | CollectionError::NotAFunction { .. }
        )
    }

    /// Get the offending path, if the error names one.
    pub fn path(&self) -> Option<&str> {
        match self {
            CollectionError::NotAnArray { path } | CollectionError::NotAFunction { path } => {
                Some(path)
            }
            CollectionError::NotAContainer { .. } => None,
        }
    }
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
