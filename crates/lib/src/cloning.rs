//! Shallow and deep copies of nested values.
//!
//! Functions and opaque values are never copied: every clone keeps the same
//! reference. A copied object keeps its source's prototype (the prototype
//! itself is shared, not copied). Copied arrays keep their holes.
//!
//! Deep copies are cycle-safe. Each source container is registered with its
//! copy *before* its entries are copied, so a second encounter of the same
//! container (a self reference, or a container reachable through two
//! parents) reuses that copy. The result is isomorphic to the source,
//! including its sharing and its cycles.

use std::collections::HashMap;

use tracing::trace;

use crate::path::Segment;
use crate::value::{Array, Object, Value};

/// Context handed to a clone customizer.
#[derive(Debug)]
pub struct CloneStep<'a> {
    /// The value about to be copied.
    pub value: &'a Value,
    /// Where the value sits in its parent; `None` for the top-level value.
    pub key: Option<&'a Segment>,
    /// The source container holding the value; `None` for the top-level value.
    pub parent: Option<&'a Value>,
    /// Nesting depth below the top-level value.
    pub depth: usize,
}

type Customizer<'c> = &'c mut dyn FnMut(&CloneStep<'_>) -> Option<Value>;

/// A new object sharing `object`'s prototype.
pub(crate) fn empty_like(object: &Object) -> Object {
    match object.prototype() {
        Some(prototype) => Object::with_prototype(prototype),
        None => Object::new(),
    }
}

/// Creates a shallow copy: a new top-level container holding the same own
/// entries. Nested containers stay shared with `value`.
///
/// ```rust
/// # use object_collection::{cloning, Value, Object};
/// let original = Value::from(vec![Value::from(Object::from_iter([("x", 1)]))]);
/// let copy = cloning::clone(&original);
/// let first = |v: &Value| v.as_array().unwrap().get(0).unwrap();
///
/// assert!(!copy.strict_eq(&original));
/// assert!(first(&copy).strict_eq(&first(&original)));
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let copy = empty_like(object);
            for (key, item) in object.entries() {
                copy.insert(key, item);
            }
            Value::Object(copy)
        }
        Value::Array(array) => Value::Array(Array::from_slots(array.slots())),
        scalar => scalar.clone(),
    }
}

/// Like [`clone`], but `customizer` is first offered the value. A `Some`
/// result is returned verbatim.
///
/// Only the top-level value is offered; entries are copied as [`clone`] does.
pub fn clone_with<F>(value: &Value, mut customizer: F) -> Value
where
    F: FnMut(&CloneStep<'_>) -> Option<Value>,
{
    let step = CloneStep {
        value,
        key: None,
        parent: None,
        depth: 0,
    };
    customizer(&step).unwrap_or_else(|| clone(value))
}

/// Creates a structurally independent copy: every nested container is
/// copied, so no container of the result is shared with `value`.
pub fn clone_deep(value: &Value) -> Value {
    DeepClone::new(None).copy(value, None, None, 0)
}

/// Like [`clone_deep`], but `customizer` is offered every value before it is
/// copied, the top-level one first. A `Some` result replaces that subtree
/// verbatim; nothing below it is visited.
pub fn clone_deep_with<F>(value: &Value, mut customizer: F) -> Value
where
    F: FnMut(&CloneStep<'_>) -> Option<Value>,
{
    let customizer: Customizer<'_> = &mut customizer;
    DeepClone::new(Some(customizer)).copy(value, None, None, 0)
}

struct DeepClone<'c> {
    /// Source container id to its copy.
    seen: HashMap<usize, Value>,
    customizer: Option<Customizer<'c>>,
}

impl<'c> DeepClone<'c> {
    fn new(customizer: Option<Customizer<'c>>) -> Self {
        Self {
            seen: HashMap::new(),
            customizer,
        }
    }

    fn copy(
        &mut self,
        value: &Value,
        key: Option<&Segment>,
        parent: Option<&Value>,
        depth: usize,
    ) -> Value {
        if let Some(customizer) = self.customizer.as_mut() {
            let step = CloneStep {
                value,
                key,
                parent,
                depth,
            };
            if let Some(custom) = customizer(&step) {
                return custom;
            }
        }

        if let Some(id) = value.container_id() {
            if let Some(copy) = self.seen.get(&id) {
                trace!(depth, "Reusing copy of repeated container");
                return copy.clone();
            }
        }

        match value {
            Value::Object(object) => {
                let copy = empty_like(object);
                self.seen.insert(object.id(), Value::Object(copy.clone()));
                for (name, item) in object.entries() {
                    let segment = Segment::Key(name.clone());
                    let item = self.copy(&item, Some(&segment), Some(value), depth + 1);
                    copy.insert(name, item);
                }
                Value::Object(copy)
            }
            Value::Array(array) => {
                let copy = Array::new();
                self.seen.insert(array.id(), Value::Array(copy.clone()));
                for (index, slot) in array.slots().iter().enumerate() {
                    let segment = Segment::Index(index);
                    let slot = slot
                        .as_ref()
                        .map(|item| self.copy(item, Some(&segment), Some(value), depth + 1));
                    copy.push_slot(slot);
                }
                Value::Array(copy)
            }
            scalar => scalar.clone(),
        }
    }
}
