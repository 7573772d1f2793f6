//! Keyed mapping container.

use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;

use super::Value;

#[derive(Default)]
struct ObjectData {
    entries: IndexMap<String, Value>,
    prototype: Option<Object>,
}

/// A shared handle to an insertion-ordered string-keyed mapping.
///
/// Cloning an `Object` clones the handle, not the entries: both handles see
/// every later mutation. Use [`crate::cloning`] for copies.
///
/// An object may carry a *prototype*. Keys reachable only through the
/// prototype chain are inherited: the `*_in` methods see them, the plain
/// methods do not. An object without a prototype is *plain*.
///
/// All methods take `&self`; the entries live behind a `RefCell` and no
/// borrow outlives a method call, so values read out of an object can be
/// written back into it (or into any object they contain) freely.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    /// Creates a new empty plain object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty object inheriting from `prototype`.
    pub fn with_prototype(prototype: Object) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            entries: IndexMap::new(),
            prototype: Some(prototype),
        })))
    }

    /// Returns the prototype, if any.
    pub fn prototype(&self) -> Option<Object> {
        self.0.borrow().prototype.clone()
    }

    /// Returns true if this object has no prototype.
    pub fn is_plain(&self) -> bool {
        self.0.borrow().prototype.is_none()
    }

    /// Returns the number of own entries.
    pub fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }

    /// Returns true if there are no own entries.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().entries.is_empty()
    }

    /// Gets an own entry.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().entries.get(key).cloned()
    }

    /// Gets an own or inherited entry, nearest first.
    pub fn get_in(&self, key: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            if let Some(value) = current.get(key) {
                return Some(value);
            }
            current = current.prototype()?;
        }
    }

    /// Returns true if `key` is an own entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().entries.contains_key(key)
    }

    /// Returns true if `key` is an own or inherited entry.
    pub fn contains_key_in(&self, key: &str) -> bool {
        self.get_in(key).is_some()
    }

    /// Inserts an own entry, returning the previous own value.
    ///
    /// Replacing an existing key keeps its position.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().entries.insert(key.into(), value.into())
    }

    /// Removes an own entry, preserving the order of the remaining ones.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().entries.shift_remove(key)
    }

    /// Removes every own entry.
    pub fn clear(&self) {
        self.0.borrow_mut().entries.clear();
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().entries.keys().cloned().collect()
    }

    /// Own values in insertion order.
    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().entries.values().cloned().collect()
    }

    /// Snapshot of the own entries in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Own keys followed by inherited keys not shadowed by a nearer object.
    pub fn keys_in(&self) -> Vec<String> {
        self.entries_in().into_iter().map(|(k, _)| k).collect()
    }

    /// Snapshot of own entries followed by unshadowed inherited entries.
    pub fn entries_in(&self) -> Vec<(String, Value)> {
        let mut seen: IndexMap<String, Value> = IndexMap::new();
        let mut current = Some(self.clone());
        while let Some(object) = current {
            for (key, value) in object.entries() {
                seen.entry(key).or_insert(value);
            }
            current = object.prototype();
        }
        seen.into_iter().collect()
    }

    /// Returns true if both handles point at the same object.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the underlying allocation, stable while the object lives.
    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Object(self.clone()), f)
    }
}
