//! Read-only walks through nested containers.
//!
//! Every function here normalizes its path once and then resolves the
//! segments strictly left to right. The walk halts at the first segment that
//! is missing or whose parent is not a container; halting is reported as
//! `None`/`false`, never as an error. Only a malformed path fails.
//!
//! A stored `Null` is a found value: [`get`] returns `Some(Value::Null)` for
//! it, which is how "found but empty" is told apart from "not found".

use crate::Result;
use crate::path::{IntoPath, Segment};
use crate::value::Value;

/// Reads the child of `container` addressed by `segment`.
///
/// Objects are addressed by key (an index addresses the key `"n"`); arrays
/// by position (a key spelling a canonical index addresses that position).
/// With `inherited`, object lookups follow the prototype chain.
pub(crate) fn read_child(container: &Value, segment: &Segment, inherited: bool) -> Option<Value> {
    match container {
        Value::Object(object) => {
            let key = segment.to_key();
            if inherited {
                object.get_in(&key)
            } else {
                object.get(&key)
            }
        }
        Value::Array(array) => segment.as_index().and_then(|index| array.get(index)),
        _ => None,
    }
}

/// Walks `segments` from `root`, returning the value at the end of the walk.
pub(crate) fn resolve(root: &Value, segments: &[Segment], inherited: bool) -> Option<Value> {
    let mut current = root.clone();
    for segment in segments {
        current = read_child(&current, segment, inherited)?;
    }
    Some(current)
}

/// Snapshot of a container's entries as `(segment, value)` pairs.
///
/// Object keys become [`Segment::Key`], array positions [`Segment::Index`].
/// Array holes and scalars have no entries.
pub(crate) fn entries(value: &Value, inherited: bool) -> Vec<(Segment, Value)> {
    match value {
        Value::Object(object) => {
            let entries = if inherited {
                object.entries_in()
            } else {
                object.entries()
            };
            entries
                .into_iter()
                .map(|(key, value)| (Segment::Key(key), value))
                .collect()
        }
        Value::Array(array) => array
            .slots()
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| Some((Segment::Index(index), slot?)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Gets the value at `path`, or `None` if the walk halts early.
///
/// Inherited keys are readable.
///
/// ```rust
/// # use object_collection::{traverse, Value};
/// let root = Value::from(serde_json::json!({"a": {"b": [10, 20]}}));
/// assert_eq!(traverse::get(&root, "a.b[1]")?, Some(Value::from(20)));
/// assert_eq!(traverse::get(&root, "a.c")?, None);
/// # Ok::<(), object_collection::Error>(())
/// ```
pub fn get(root: &Value, path: impl IntoPath) -> Result<Option<Value>> {
    let path = path.into_path()?;
    Ok(resolve(root, path.segments(), true))
}

/// Gets the value at `path`, substituting `default` when it is not found.
///
/// The default is never stored.
pub fn get_or(root: &Value, path: impl IntoPath, default: impl Into<Value>) -> Result<Value> {
    Ok(get(root, path)?.unwrap_or_else(|| default.into()))
}

/// Returns true if every segment of `path` is present as an own entry.
pub fn has(root: &Value, path: impl IntoPath) -> Result<bool> {
    let path = path.into_path()?;
    Ok(resolve(root, path.segments(), false).is_some())
}

/// Returns true if every segment of `path` is present, counting inherited
/// keys.
pub fn has_in(root: &Value, path: impl IntoPath) -> Result<bool> {
    let path = path.into_path()?;
    Ok(resolve(root, path.segments(), true).is_some())
}

/// Returns true if every path is present (see [`has`]).
///
/// Paths are checked in order and checking stops at the first missing one,
/// so later paths are not normalized after a miss.
pub fn exists<P: IntoPath>(root: &Value, paths: impl IntoIterator<Item = P>) -> Result<bool> {
    for path in paths {
        if !has(root, path)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Reads several paths at once, `None` for each one that is not found.
pub fn at<P: IntoPath>(root: &Value, paths: impl IntoIterator<Item = P>) -> Result<Vec<Option<Value>>> {
    paths.into_iter().map(|path| get(root, path)).collect()
}
