//! Ordered sequence container.

use std::{cell::RefCell, fmt, rc::Rc};

use super::Value;

/// A shared handle to an integer-indexed sequence.
///
/// Like [`super::Object`], cloning an `Array` clones the handle.
///
/// Arrays may be sparse. Writing past the end leaves *holes* in the skipped
/// slots, and [`Array::delete`] turns a slot into a hole. A hole is counted by
/// [`Array::len`] but holds nothing: [`Array::get`] returns `None` for it,
/// which is how it differs from a stored [`Value::Null`].
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Option<Value>>>>);

impl Array {
    /// Creates a new empty array.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_slots(slots: Vec<Option<Value>>) -> Self {
        Self(Rc::new(RefCell::new(slots)))
    }

    /// Returns the number of slots, holes included.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if the array has no slots.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Gets the element at `index`. Holes and out-of-range indices are `None`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned().flatten()
    }

    /// Returns true if `index` holds an element (not a hole).
    pub fn contains(&self, index: usize) -> bool {
        matches!(self.0.borrow().get(index), Some(Some(_)))
    }

    /// Writes `value` at `index`, leaving holes when `index` is past the
    /// end. Returns the previous element, if there was one.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let mut slots = self.0.borrow_mut();
        let value = value.into();
        if index < slots.len() {
            return slots[index].replace(value);
        }
        slots.resize(index, None);
        slots.push(Some(value));
        None
    }

    /// Appends an element.
    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(Some(value.into()));
    }

    /// Appends a slot that may be a hole.
    pub(crate) fn push_slot(&self, slot: Option<Value>) {
        self.0.borrow_mut().push(slot);
    }

    /// Turns the slot at `index` into a hole without shifting later
    /// elements. Returns the element that was there, `None` for a hole.
    pub fn delete(&self, index: usize) -> Option<Value> {
        self.0.borrow_mut().get_mut(index).and_then(|slot| slot.take())
    }

    /// Removes the slot at `index`, shifting later slots down. Returns the
    /// element that was there, `None` for a hole.
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut slots = self.0.borrow_mut();
        if index < slots.len() {
            slots.remove(index)
        } else {
            None
        }
    }

    /// Removes every slot.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Snapshot of the elements with holes read as `Null`.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0
            .borrow()
            .iter()
            .map(|slot| slot.clone().unwrap_or_default())
            .collect()
    }

    /// Snapshot of the slots, `None` marking a hole.
    pub fn slots(&self) -> Vec<Option<Value>> {
        self.0.borrow().clone()
    }

    /// Returns true if both handles point at the same array.
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Self::from_slots(items.into_iter().map(Some).collect())
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self::from_slots(iter.into_iter().map(|item| Some(item.into())).collect())
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Array(self.clone()), f)
    }
}
