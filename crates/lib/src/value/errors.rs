//! Error types for value conversions and stored functions.

use thiserror::Error;

/// Structured error types for working with [`super::Value`]s.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValueError {
    /// A value did not have the shape a conversion required
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A stored function reported a failure
    #[error("Function call failed: {reason}")]
    CallFailed { reason: String },
}

impl ValueError {
    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, ValueError::TypeMismatch { .. })
    }

    /// Check if this error came from a stored function
    pub fn is_call_error(&self) -> bool {
        matches!(self, ValueError::CallFailed { .. })
    }
}

// Conversion from ValueError to the main Error type
impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
