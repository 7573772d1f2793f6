//! Error types for path normalization.
//!
//! A `PathError` is only ever raised for a path whose *shape* is unusable.
//! A well-formed path that simply does not exist in the data is never an error.

use thiserror::Error;

/// Structured error types for path parsing and normalization.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Paths must contain at least one segment
    #[error("Invalid path: path cannot be empty")]
    Empty,

    /// A `[` was opened but never closed
    #[error("Invalid path '{path}': unterminated bracket at position {position}")]
    UnterminatedBracket { path: String, position: usize },

    /// A quoted bracket segment was never closed
    #[error("Invalid path '{path}': unterminated quote at position {position}")]
    UnterminatedQuote { path: String, position: usize },

    /// A character appeared where the grammar does not allow it
    #[error("Invalid path '{path}': unexpected '{found}' at position {position}")]
    UnexpectedCharacter {
        path: String,
        found: char,
        position: usize,
    },

    /// A dynamic value was used as a path but is not a string, number or
    /// sequence of strings and numbers
    #[error("Invalid path: expected string, number or sequence of segments, found {type_name}")]
    UnsupportedShape { type_name: String },
}

impl PathError {
    /// Check if this error was raised while parsing a path string
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            PathError::UnterminatedBracket { .. }
                | PathError::UnterminatedQuote { .. }
                | PathError::UnexpectedCharacter { .. }
        )
    }

    /// Check if this error is about the kind of value supplied as a path
    pub fn is_shape_error(&self) -> bool {
        matches!(self, PathError::Empty | PathError::UnsupportedShape { .. })
    }

    /// Get the offending path string, when one was supplied
    pub fn path(&self) -> Option<&str> {
        match self {
            PathError::UnterminatedBracket { path, .. }
            | PathError::UnterminatedQuote { path, .. }
            | PathError::UnexpectedCharacter { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from PathError to the main Error type
impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}
