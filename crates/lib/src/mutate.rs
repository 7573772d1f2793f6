//! Writes through paths, creating missing intermediate containers.
//!
//! A write walks every segment but the last. Where the walk finds an
//! existing container it descends into it; where it finds nothing, or a
//! scalar, it creates a new container and stores it in place. The kind of a
//! created container is decided by the *next* segment: an index-like one
//! (`0`, `"12"`, not `"01"`, at most [`MAX_ARRAY_INDEX`]) creates an array,
//! anything else an object. The value is then stored under the last segment.
//!
//! Intermediate reads see own entries only. A container that is only
//! inherited is copied into an own entry before the write descends, so a
//! prototype is never modified and its other entries stay readable.
//!
//! Some writes cannot land and are dropped without an error, each with a
//! `debug` event: a root that is not a container, a non-index key on an
//! array, and an index above [`MAX_ARRAY_INDEX`] on an array.
//!
//! ```rust
//! # use object_collection::{mutate, Value};
//! let root = Value::object();
//! mutate::set(&root, "a[0].b", "x")?;
//! assert_eq!(root.to_string(), r#"{"a": [{"b": "x"}]}"#);
//! # Ok::<(), object_collection::Error>(())
//! ```
//!
//! [`MAX_ARRAY_INDEX`]: crate::constants::MAX_ARRAY_INDEX

use tracing::debug;

use crate::Result;
use crate::cloning::clone;
use crate::constants::MAX_ARRAY_INDEX;
use crate::path::{IntoPath, Path, Segment};
use crate::traverse::{read_child, resolve};
use crate::value::{Object, Value};

/// Context handed to a [`set_with`] customizer at each intermediate step.
#[derive(Debug)]
pub struct SetStep<'a> {
    /// The full path being written.
    pub path: &'a Path,
    /// Position of [`SetStep::key`] within the path.
    pub depth: usize,
    /// The container the step writes into.
    pub parent: &'a Value,
    /// The value currently stored under the key, if any.
    pub existing: Option<&'a Value>,
}

impl SetStep<'_> {
    /// The segment this step writes.
    pub fn key(&self) -> &Segment {
        &self.path.segments()[self.depth]
    }

    /// The segment that will be written inside the value this step produces.
    pub fn next_key(&self) -> &Segment {
        &self.path.segments()[self.depth + 1]
    }
}

/// Stores `value` under `segment` in `container`.
///
/// Returns false when the write was dropped.
pub(crate) fn write_child(container: &Value, segment: &Segment, value: Value) -> bool {
    match container {
        Value::Object(object) => {
            object.insert(segment.to_key(), value);
            true
        }
        Value::Array(array) => match segment.as_index() {
            Some(index) if index <= MAX_ARRAY_INDEX => {
                array.set(index, value);
                true
            }
            Some(index) => {
                debug!(index, limit = MAX_ARRAY_INDEX, "Dropping array write above index limit");
                false
            }
            None => {
                debug!(key = %segment, "Dropping non-index key write on array");
                false
            }
        },
        _ => false,
    }
}

fn create_intermediate(path: &Path, depth: usize, next: &Segment) -> Value {
    let created = if next.is_index_like() {
        Value::array()
    } else {
        Value::object()
    };
    debug!(
        path = %path,
        depth,
        kind = created.type_name(),
        "Creating intermediate container"
    );
    created
}

/// Core write. The customizer is consulted at every intermediate step;
/// returning `None` defers to reuse-or-create.
fn set_path<F>(root: &Value, path: &Path, value: Value, mut customizer: F) -> bool
where
    F: FnMut(&SetStep<'_>) -> Option<Value>,
{
    if !root.is_container() {
        debug!(path = %path, root = root.type_name(), "Dropping write into non-container root");
        return false;
    }

    let (prefix, last) = path.split_last();
    let mut current = root.clone();
    for (depth, segment) in prefix.iter().enumerate() {
        let existing = read_child(&current, segment, false);
        let step = SetStep {
            path,
            depth,
            parent: &current,
            existing: existing.as_ref(),
        };

        let next = match customizer(&step) {
            Some(custom) => custom,
            None => match &existing {
                Some(found) if found.is_container() => found.clone(),
                // Shadow an inherited container with an own copy so the
                // prototype is never written
                None => match read_child(&current, segment, true) {
                    Some(inherited) if inherited.is_container() => {
                        debug!(path = %path, depth, "Copying inherited container before writing");
                        clone(&inherited)
                    }
                    _ => create_intermediate(path, depth, step.next_key()),
                },
                Some(_) => create_intermediate(path, depth, step.next_key()),
            },
        };

        let unchanged = existing.as_ref().is_some_and(|found| found.strict_eq(&next));
        if !unchanged && !write_child(&current, segment, next.clone()) {
            return false;
        }
        if !next.is_container() {
            debug!(path = %path, depth, "Dropping write below a scalar intermediate");
            return false;
        }
        current = next;
    }

    write_child(&current, last, value)
}

/// Sets `value` at `path`, creating missing intermediate containers.
///
/// A scalar standing where an intermediate container is needed is replaced.
/// A root that is not a container is left unchanged.
pub fn set(root: &Value, path: impl IntoPath, value: impl Into<Value>) -> Result<()> {
    let path = path.into_path()?;
    set_path(root, &path, value.into(), |_| None);
    Ok(())
}

/// Like [`set`], but the customizer chooses each intermediate value.
///
/// The customizer sees every intermediate step, whether or not something is
/// stored there. A `Some` result is stored under the step's key and walked
/// into; a `None` result falls back to reusing an existing container or
/// creating one. A customizer returning a scalar ends the write at that step.
///
/// ```rust
/// # use object_collection::{mutate, Value};
/// let root = Value::object();
/// // Numeric segments create objects instead of arrays
/// mutate::set_with(&root, "[0][1]", "a", |_| Some(Value::object()))?;
/// assert_eq!(root.to_string(), r#"{"0": {"1": "a"}}"#);
/// # Ok::<(), object_collection::Error>(())
/// ```
pub fn set_with<F>(root: &Value, path: impl IntoPath, value: impl Into<Value>, customizer: F) -> Result<()>
where
    F: FnMut(&SetStep<'_>) -> Option<Value>,
{
    let path = path.into_path()?;
    set_path(root, &path, value.into(), customizer);
    Ok(())
}

/// Like [`set`], but skipped entirely when `value` is `Null`.
///
/// Nothing is created along the path for a skipped write. The path is still
/// validated.
pub fn set_defined(root: &Value, path: impl IntoPath, value: impl Into<Value>) -> Result<()> {
    let path = path.into_path()?;
    let value = value.into();
    if value.is_null() {
        return Ok(());
    }
    set_path(root, &path, value, |_| None);
    Ok(())
}

/// Batch form of [`set`]: each own key of `values` is parsed as a path and
/// its value set there, in the object's insertion order.
///
/// A malformed key fails the batch; keys before it have already been
/// written.
pub fn set_many(root: &Value, values: &Object) -> Result<()> {
    for (key, value) in values.entries() {
        let path = Path::parse(&key)?;
        set_path(root, &path, value, |_| None);
    }
    Ok(())
}

/// Removes the entry at `path`. Returns whether something was removed.
///
/// Everything but the last segment is resolved read-only; if that prefix
/// does not lead to a container the call is a no-op. Emptied ancestors are
/// kept. Removing an array element leaves a hole in its slot, so later
/// elements keep their positions and the slot reads as missing.
pub fn unset(root: &Value, path: impl IntoPath) -> Result<bool> {
    let path = path.into_path()?;
    let (prefix, last) = path.split_last();
    let removed = match resolve(root, prefix, true) {
        Some(Value::Object(object)) => object.remove(&last.to_key()).is_some(),
        Some(Value::Array(array)) => last
            .as_index()
            .and_then(|index| array.delete(index))
            .is_some(),
        _ => false,
    };
    Ok(removed)
}

/// Replaces the value at `path` with `updater(current)`.
///
/// `current` is `None` when nothing is stored at the path.
pub fn update<U>(root: &Value, path: impl IntoPath, updater: U) -> Result<()>
where
    U: FnOnce(Option<Value>) -> Value,
{
    update_with(root, path, updater, |_| None)
}

/// [`update`] threading a [`set_with`] customizer through the write.
pub fn update_with<U, F>(root: &Value, path: impl IntoPath, updater: U, customizer: F) -> Result<()>
where
    U: FnOnce(Option<Value>) -> Value,
    F: FnMut(&SetStep<'_>) -> Option<Value>,
{
    let path = path.into_path()?;
    let current = resolve(root, path.segments(), true);
    set_path(root, &path, updater(current), customizer);
    Ok(())
}
