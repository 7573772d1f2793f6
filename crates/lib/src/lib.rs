//!
//! Object Collection: path-addressed access to deeply nested objects and arrays.
//!
//! The library reads and writes arbitrarily nested fields without manual
//! null-checking or intermediate-container creation, and combines whole
//! structures with clone and merge operations.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: The closed sum type of everything that can be stored. Objects and arrays are shared handles, so read results alias the structure they came from.
//! * **Paths (`path::Path`)**: A normalized, non-empty sequence of segments (keys or indices), parsed from strings like `"a.b[0].c"` or built from pre-split sequences.
//! * **Traversal (`traverse`)**: Read-only walks: `get`, `has`, `has_in`, `exists`, `at`. A missing path is never an error.
//! * **Mutation (`mutate`)**: Writes that create missing intermediate containers, choosing an array or an object by inspecting the next segment.
//! * **Cloning (`cloning`)**: Shallow and cycle-safe deep copies, with customizer hooks.
//! * **Merging (`merge`)**: Shallow `assign*`, deep `merge*` and the fill-only `defaults*` families.
//! * **Selection (`select`)**: `pick`, `omit` and `defined` copies of a root.
//! * **Collections (`collection::Collection`)**: A wrapper owning one root container, exposing every operation as a chainable method plus view and independent-copy sub-instances.
//!
//! ```rust
//! use object_collection::{mutate, traverse, Value};
//!
//! let root = Value::object();
//! mutate::set(&root, "a[0].b", "x")?;
//! assert_eq!(traverse::get(&root, "a.0.b")?, Some(Value::from("x")));
//! assert!(traverse::get(&root, "a[1].b")?.is_none());
//! # Ok::<(), object_collection::Error>(())
//! ```

pub mod cloning;
pub mod collection;
pub mod constants;
pub mod merge;
pub mod mutate;
pub mod path;
pub mod select;
pub mod traverse;
pub mod value;

/// Re-export the core types for easier access.
pub use collection::Collection;
pub use path::{IntoPath, Path, Segment};
pub use value::{Array, Function, Object, Opaque, Value};

/// Result type used throughout the Object Collection library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Object Collection library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[cfg(feature = "json")]
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured path errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured value errors from the value module
    #[error(transparent)]
    Value(value::ValueError),

    /// Structured wrapper errors from the collection module
    #[error(transparent)]
    Collection(collection::CollectionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "path",
            Error::Value(_) => "value",
            Error::Collection(_) => "collection",
            #[cfg(feature = "json")]
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error was caused by a malformed or unsupported path.
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_type_error(),
            Error::Collection(collection_err) => collection_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error came from a stored function.
    pub fn is_call_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_call_error(),
            _ => false,
        }
    }

    /// Check if this error is a serialization failure.
    pub fn is_serialize_error(&self) -> bool {
        #[cfg(feature = "json")]
        if let Error::Serialize(_) = self {
            return true;
        }
        false
    }
}
