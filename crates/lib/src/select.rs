//! Copies of a root restricted to, or stripped of, some of its entries.

use crate::Result;
use crate::cloning::{clone_deep, empty_like};
use crate::mutate::{set, unset};
use crate::path::IntoPath;
use crate::traverse::resolve;
use crate::value::{Array, Value};

/// Builds a new object holding only the given paths.
///
/// Paths are read with inherited keys visible and written into the result
/// with [`set`], so nested paths keep their nesting. Missing paths are
/// skipped. Picked values alias the source.
///
/// ```rust
/// # use object_collection::{select, Value};
/// # use serde_json::json;
/// let root = Value::from(json!({"a": {"b": 1, "c": 2}, "d": 3}));
/// let picked = select::pick(&root, ["a.b", "d", "missing"])?;
/// assert_eq!(picked, Value::from(json!({"a": {"b": 1}, "d": 3})));
/// # Ok::<(), object_collection::Error>(())
/// ```
pub fn pick<P: IntoPath>(root: &Value, paths: impl IntoIterator<Item = P>) -> Result<Value> {
    let picked = Value::object();
    for path in paths {
        let path = path.into_path()?;
        if let Some(value) = resolve(root, path.segments(), true) {
            set(&picked, &path, value)?;
        }
    }
    Ok(picked)
}

/// Builds a deep copy of `root` with each of the given paths removed.
///
/// `root` itself is untouched.
pub fn omit<P: IntoPath>(root: &Value, paths: impl IntoIterator<Item = P>) -> Result<Value> {
    let copy = clone_deep(root);
    for path in paths {
        unset(&copy, path)?;
    }
    Ok(copy)
}

/// Shallow copy of `root` without its top-level `Null` entries.
///
/// Objects keep their prototype. Arrays are compacted, dropping holes too,
/// so later elements move down.
pub fn defined(root: &Value) -> Value {
    match root {
        Value::Object(object) => {
            let copy = empty_like(object);
            for (key, value) in object.entries() {
                if !value.is_null() {
                    copy.insert(key, value);
                }
            }
            Value::Object(copy)
        }
        Value::Array(array) => Value::Array(
            array
                .to_vec()
                .into_iter()
                .filter(|value| !value.is_null())
                .collect::<Array>(),
        ),
        scalar => scalar.clone(),
    }
}
