//! Combining containers: shallow `assign*`, deep `merge*` and the fill-only
//! `defaults*` families.
//!
//! Every operation mutates `target` in place, applies `sources` in order
//! (later sources win) and returns a handle to `target`. A target that is
//! not a container is returned unchanged; scalar sources contribute nothing.
//!
//! # Deep merge
//!
//! For each key of a source (own and inherited):
//! - an array source value is merged index by index into the target's array
//!   at that key, or into a fresh array if the target holds anything else;
//! - a plain object source value is merged key by key into the target's
//!   object at that key, or into a fresh object;
//! - anything else (scalars, functions, objects with a prototype) replaces
//!   the target's value.
//!
//! Fresh containers are filled recursively, so the target never ends up
//! sharing a container with a source. A source container reached again while
//! it is being merged (a cycle) reuses the container it is being merged
//! into.
//!
//! ```rust
//! # use object_collection::{merge, Value};
//! # use serde_json::json;
//! let target = Value::from(json!({"a": 1, "b": 2}));
//! merge::merge(&target, &[Value::from(json!({"b": 3, "c": 4}))]);
//! assert_eq!(target, Value::from(json!({"a": 1, "b": 3, "c": 4})));
//! ```

use std::collections::HashMap;

use tracing::trace;

use crate::mutate::write_child;
use crate::path::Segment;
use crate::traverse::{entries, read_child};
use crate::value::Value;

/// Context handed to an assign or merge customizer for one key.
#[derive(Debug)]
pub struct MergeStep<'a> {
    /// The key being combined.
    pub key: &'a Segment,
    /// The target's current value under the key, if any.
    pub target_value: Option<&'a Value>,
    /// The source's value under the key.
    pub source_value: &'a Value,
    /// The container being written.
    pub target: &'a Value,
    /// The container being read.
    pub source: &'a Value,
}

type Customizer<'c> = &'c mut dyn FnMut(&MergeStep<'_>) -> Option<Value>;

/// Stores `value` unless `current`, the target's value under `key`, is that
/// exact value.
fn assign_value(target: &Value, key: &Segment, value: Value, current: Option<&Value>) {
    if current.is_some_and(|current| current.strict_eq(&value)) {
        return;
    }
    write_child(target, key, value);
}

fn assign_impl(target: &Value, sources: &[Value], inherited: bool, mut customizer: Option<Customizer<'_>>) -> Value {
    if !target.is_container() {
        return target.clone();
    }
    for source in sources {
        for (key, source_value) in entries(source, inherited) {
            let current = read_child(target, &key, true);
            let custom = customizer.as_mut().and_then(|customizer| {
                customizer(&MergeStep {
                    key: &key,
                    target_value: current.as_ref(),
                    source_value: &source_value,
                    target,
                    source,
                })
            });
            // Only an equal own value makes the write redundant
            let own = read_child(target, &key, false);
            assign_value(target, &key, custom.unwrap_or(source_value), own.as_ref());
        }
    }
    target.clone()
}

/// Copies the own entries of each source into `target`.
///
/// Nested containers are stored by reference, not copied.
pub fn assign(target: &Value, sources: &[Value]) -> Value {
    assign_impl(target, sources, false, None)
}

/// Like [`assign`], but inherited entries of the sources are copied too.
pub fn assign_in(target: &Value, sources: &[Value]) -> Value {
    assign_impl(target, sources, true, None)
}

/// Like [`assign`], but `customizer` may produce the value stored for each
/// key. `None` stores the source value.
pub fn assign_with<F>(target: &Value, sources: &[Value], mut customizer: F) -> Value
where
    F: FnMut(&MergeStep<'_>) -> Option<Value>,
{
    let customizer: Customizer<'_> = &mut customizer;
    assign_impl(target, sources, false, Some(customizer))
}

/// [`assign_in`] with a customizer, see [`assign_with`].
pub fn assign_in_with<F>(target: &Value, sources: &[Value], mut customizer: F) -> Value
where
    F: FnMut(&MergeStep<'_>) -> Option<Value>,
{
    let customizer: Customizer<'_> = &mut customizer;
    assign_impl(target, sources, true, Some(customizer))
}

/// Copies entries of each source (own and inherited) into `target` only
/// where the target has nothing, own or inherited, under that key.
///
/// A `Null` in the target counts as present and is kept.
pub fn defaults(target: &Value, sources: &[Value]) -> Value {
    if !target.is_container() {
        return target.clone();
    }
    for source in sources {
        for (key, source_value) in entries(source, true) {
            if read_child(target, &key, true).is_none() {
                write_child(target, &key, source_value);
            }
        }
    }
    target.clone()
}

/// Deep form of [`defaults`]: where both sides hold containers under a key,
/// the source's entries are filled into the target's container recursively.
/// Values already present in the target are never overwritten.
pub fn defaults_deep(target: &Value, sources: &[Value]) -> Value {
    Merger::new(None, true).run(target, sources)
}

/// Deeply merges each source into `target`. See the module documentation
/// for the rules.
pub fn merge(target: &Value, sources: &[Value]) -> Value {
    Merger::new(None, false).run(target, sources)
}

/// Like [`merge`], but `customizer` is consulted for every key first. A
/// `Some` result is stored verbatim and not descended into.
///
/// ```rust
/// # use object_collection::{merge, Value, Array};
/// # use serde_json::json;
/// // Concatenate arrays instead of merging them index by index
/// let target = Value::from(json!({"a": [1]}));
/// merge::merge_with(&target, &[Value::from(json!({"a": [2, 3]}))], |step| {
///     match (step.target_value?, step.source_value) {
///         (Value::Array(left), Value::Array(right)) => {
///             let joined: Array = left.to_vec().into_iter().chain(right.to_vec()).collect();
///             Some(Value::from(joined))
///         }
///         _ => None,
///     }
/// });
/// assert_eq!(target, Value::from(json!({"a": [1, 2, 3]})));
/// ```
pub fn merge_with<F>(target: &Value, sources: &[Value], mut customizer: F) -> Value
where
    F: FnMut(&MergeStep<'_>) -> Option<Value>,
{
    let customizer: Customizer<'_> = &mut customizer;
    Merger::new(Some(customizer), false).run(target, sources)
}

struct Merger<'c> {
    /// Source containers currently being merged, mapped to their destination.
    stack: HashMap<usize, Value>,
    customizer: Option<Customizer<'c>>,
    /// Keep every value already present in the target.
    fill_only: bool,
}

impl<'c> Merger<'c> {
    fn new(customizer: Option<Customizer<'c>>, fill_only: bool) -> Self {
        Self {
            stack: HashMap::new(),
            customizer,
            fill_only,
        }
    }

    fn run(mut self, target: &Value, sources: &[Value]) -> Value {
        if !target.is_container() {
            return target.clone();
        }
        for source in sources {
            if source.strict_eq(target) {
                continue;
            }
            self.merge_into(target, source);
        }
        target.clone()
    }

    fn merge_into(&mut self, target: &Value, source: &Value) {
        for (key, source_value) in entries(source, true) {
            self.merge_key(target, source, &key, source_value);
        }
    }

    fn merge_key(&mut self, target: &Value, source: &Value, key: &Segment, source_value: Value) {
        let current = read_child(target, key, true);

        if let Some(stacked) = source_value
            .container_id()
            .and_then(|id| self.stack.get(&id))
            .cloned()
        {
            trace!(key = %key, "Reusing merge destination of repeated source");
            assign_value(target, key, stacked, current.as_ref());
            return;
        }

        if let Some(custom) = self.customize(target, source, key, current.as_ref(), &source_value) {
            assign_value(target, key, custom, current.as_ref());
            return;
        }

        let destination = match (&source_value, &current) {
            (Value::Array(_), Some(existing @ Value::Array(_))) => Some(existing.clone()),
            (Value::Array(_), _) => Some(Value::array()),
            (Value::Object(object), Some(existing @ Value::Object(_))) if object.is_plain() => {
                Some(existing.clone())
            }
            (Value::Object(object), _) if object.is_plain() => Some(Value::object()),
            _ => None,
        };

        match destination {
            Some(destination) => {
                self.descend(&destination, &source_value);
                assign_value(target, key, destination, current.as_ref());
            }
            None => assign_value(target, key, source_value, current.as_ref()),
        }
    }

    /// Merges `source` into `destination` with `source` on the stack.
    fn descend(&mut self, destination: &Value, source: &Value) {
        let Some(id) = source.container_id() else {
            return;
        };
        self.stack.insert(id, destination.clone());
        self.merge_into(destination, source);
        self.stack.remove(&id);
    }

    fn customize(
        &mut self,
        target: &Value,
        source: &Value,
        key: &Segment,
        current: Option<&Value>,
        source_value: &Value,
    ) -> Option<Value> {
        if self.fill_only {
            let existing = current?;
            if existing.is_container() && source_value.is_container() {
                self.descend(existing, source_value);
            }
            return Some(existing.clone());
        }
        let customizer = self.customizer.as_mut()?;
        customizer(&MergeStep {
            key,
            target_value: current,
            source_value,
            target,
            source,
        })
    }
}
