//! A wrapper owning one root container.
//!
//! [`Collection`] stores a root object or array and exposes every engine
//! operation as a method, returning `&Self` where chaining makes sense.
//!
//! # Views and copies
//!
//! A collection can derive another collection from a sub-path in two modes:
//!
//! - **view** ([`Collection::new_instance_from`], [`Collection::path`]): the
//!   new collection wraps the very container stored at the path, so writes
//!   through either collection are visible through both;
//! - **independent copy** ([`Collection::clone_instance_from`],
//!   [`Collection::clone_path`]): the new collection wraps a deep copy and
//!   shares nothing with the original.
//!
//! ```rust
//! use object_collection::{Collection, Value};
//! use serde_json::json;
//!
//! let users = Collection::from_json(json!({"admin": {"name": "root"}}))?;
//!
//! let view = users.path("admin", None)?;
//! view.set("name", "alice")?;
//! assert_eq!(users.get("admin.name")?, Some(Value::from("alice")));
//!
//! let copy = users.clone_path("admin", None)?;
//! copy.set("name", "bob")?;
//! assert_eq!(users.get("admin.name")?, Some(Value::from("alice")));
//! # Ok::<(), object_collection::Error>(())
//! ```

use std::{cell::RefCell, fmt};

use crate::Result;
use crate::cloning::{self, CloneStep};
use crate::merge::{self, MergeStep};
use crate::mutate::{self, SetStep};
use crate::path::IntoPath;
use crate::select;
use crate::traverse;
use crate::value::{Array, Object, Value};

pub mod errors;

pub use errors::CollectionError;

/// A root object or array with path-addressed access.
///
/// Methods take `&self`: the root is a shared handle and mutations happen
/// inside it.
pub struct Collection {
    data: RefCell<Value>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    /// Creates a collection around a new empty object.
    pub fn new() -> Self {
        Self {
            data: RefCell::new(Value::object()),
        }
    }

    /// Wraps `value` without copying it.
    ///
    /// # Errors
    /// Returns [`CollectionError::NotAContainer`] if `value` is a scalar.
    pub fn from_value(value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        if !value.is_container() {
            return Err(CollectionError::NotAContainer {
                type_name: value.type_name().to_string(),
            }
            .into());
        }
        Ok(Self {
            data: RefCell::new(value),
        })
    }

    /// Wraps a deep copy of `value`.
    pub fn cloned_from(value: &Value) -> Result<Self> {
        Self::from_value(cloning::clone_deep(value))
    }

    /// Wraps a value converted from JSON.
    #[cfg(feature = "json")]
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        Self::from_value(Value::from(json))
    }

    /// Returns a handle to the root. Mutating it mutates the collection.
    pub fn data(&self) -> Value {
        self.data.borrow().clone()
    }

    /// Consumes the collection, returning its root.
    pub fn into_value(self) -> Value {
        self.data.into_inner()
    }

    /// Replaces the root.
    pub fn replace_data(&self, value: impl Into<Value>) -> Result<&Self> {
        let value = value.into();
        if !value.is_container() {
            return Err(CollectionError::NotAContainer {
                type_name: value.type_name().to_string(),
            }
            .into());
        }
        *self.data.borrow_mut() = value;
        Ok(self)
    }

    /// Returns an independent deep copy of this collection.
    pub fn clone_this(&self) -> Self {
        Self {
            data: RefCell::new(cloning::clone_deep(&self.data())),
        }
    }

    /// Returns a view of the container at `path`.
    ///
    /// When nothing is stored at `path`, `default` (an empty object if
    /// `None`) is first written there, so the view is attached to the root.
    ///
    /// # Errors
    /// Fails for a malformed path, or with [`CollectionError::NotAContainer`]
    /// if the value found at `path` is a scalar.
    pub fn new_instance_from(&self, path: impl IntoPath, default: Option<Value>) -> Result<Self> {
        let path = path.into_path()?;
        let root = self.data();
        let value = match traverse::get(&root, &path)? {
            Some(value) => value,
            None => {
                let value = default.unwrap_or_else(Value::object);
                mutate::set(&root, &path, value.clone())?;
                value
            }
        };
        Self::from_value(value)
    }

    /// Alias of [`Collection::new_instance_from`].
    pub fn path(&self, path: impl IntoPath, default: Option<Value>) -> Result<Self> {
        self.new_instance_from(path, default)
    }

    /// Returns an independent deep copy of the container at `path`, or of
    /// `default` (an empty object if `None`) when nothing is stored there.
    ///
    /// The original is never written.
    pub fn clone_instance_from(&self, path: impl IntoPath, default: Option<Value>) -> Result<Self> {
        let value = traverse::get(&self.data(), path)?;
        let value = value.unwrap_or_else(|| default.unwrap_or_else(Value::object));
        Self::cloned_from(&value)
    }

    /// Alias of [`Collection::clone_instance_from`].
    pub fn clone_path(&self, path: impl IntoPath, default: Option<Value>) -> Result<Self> {
        self.clone_instance_from(path, default)
    }

    // Reads

    /// See [`traverse::get`].
    pub fn get(&self, path: impl IntoPath) -> Result<Option<Value>> {
        traverse::get(&self.data(), path)
    }

    /// See [`traverse::get_or`].
    pub fn get_or(&self, path: impl IntoPath, default: impl Into<Value>) -> Result<Value> {
        traverse::get_or(&self.data(), path, default)
    }

    /// See [`traverse::has`].
    pub fn has(&self, path: impl IntoPath) -> Result<bool> {
        traverse::has(&self.data(), path)
    }

    /// See [`traverse::has_in`].
    pub fn has_in(&self, path: impl IntoPath) -> Result<bool> {
        traverse::has_in(&self.data(), path)
    }

    /// See [`traverse::exists`].
    pub fn exists<P: IntoPath>(&self, paths: impl IntoIterator<Item = P>) -> Result<bool> {
        traverse::exists(&self.data(), paths)
    }

    /// See [`traverse::at`].
    pub fn at<P: IntoPath>(&self, paths: impl IntoIterator<Item = P>) -> Result<Vec<Option<Value>>> {
        traverse::at(&self.data(), paths)
    }

    /// Returns the array at `path`, creating an empty one when nothing is
    /// stored there.
    ///
    /// # Errors
    /// A non-array value at `path` fails with [`CollectionError::NotAnArray`]
    /// unless `force` is set, in which case the value is wrapped into a
    /// one-element array that replaces it.
    pub fn array(&self, path: impl IntoPath, force: bool) -> Result<Array> {
        let path = path.into_path()?;
        let root = self.data();
        match traverse::get(&root, &path)? {
            Some(Value::Array(array)) => return Ok(array),
            None => mutate::set(&root, &path, Array::new())?,
            Some(other) if force => mutate::set(&root, &path, Array::from(vec![other]))?,
            Some(_) => {
                return Err(CollectionError::NotAnArray {
                    path: path.to_string(),
                }
                .into());
            }
        }
        match traverse::get(&root, &path)? {
            Some(Value::Array(array)) => Ok(array),
            _ => Err(CollectionError::NotAnArray {
                path: path.to_string(),
            }
            .into()),
        }
    }

    /// Invokes the function stored at `path`.
    ///
    /// # Errors
    /// Fails with [`CollectionError::NotAFunction`] if no function is stored
    /// there; errors returned by the function propagate unchanged.
    pub fn call(&self, path: impl IntoPath, args: &[Value]) -> Result<Value> {
        let path = path.into_path()?;
        match traverse::get(&self.data(), &path)? {
            Some(Value::Function(function)) => function.call(args),
            _ => Err(CollectionError::NotAFunction {
                path: path.to_string(),
            }
            .into()),
        }
    }

    // Writes

    /// See [`mutate::set`].
    pub fn set(&self, path: impl IntoPath, value: impl Into<Value>) -> Result<&Self> {
        mutate::set(&self.data(), path, value)?;
        Ok(self)
    }

    /// See [`mutate::set_with`].
    pub fn set_with<F>(&self, path: impl IntoPath, value: impl Into<Value>, customizer: F) -> Result<&Self>
    where
        F: FnMut(&SetStep<'_>) -> Option<Value>,
    {
        mutate::set_with(&self.data(), path, value, customizer)?;
        Ok(self)
    }

    /// See [`mutate::set_defined`].
    pub fn set_defined(&self, path: impl IntoPath, value: impl Into<Value>) -> Result<&Self> {
        mutate::set_defined(&self.data(), path, value)?;
        Ok(self)
    }

    /// See [`mutate::set_many`].
    pub fn set_many(&self, values: &Object) -> Result<&Self> {
        mutate::set_many(&self.data(), values)?;
        Ok(self)
    }

    /// Sets the same value at every path.
    ///
    /// Containers are not copied: every path receives the same handle.
    pub fn set_paths_to_same_value<P: IntoPath>(
        &self,
        paths: impl IntoIterator<Item = P>,
        value: impl Into<Value>,
    ) -> Result<&Self> {
        let value = value.into();
        let root = self.data();
        for path in paths {
            mutate::set(&root, path, value.clone())?;
        }
        Ok(self)
    }

    /// Sets `value` at `path` and returns it.
    pub fn set_and_get(&self, path: impl IntoPath, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        mutate::set(&self.data(), path, value.clone())?;
        Ok(value)
    }

    /// See [`mutate::unset`].
    pub fn unset(&self, path: impl IntoPath) -> Result<bool> {
        mutate::unset(&self.data(), path)
    }

    /// See [`mutate::update`].
    pub fn update<U>(&self, path: impl IntoPath, updater: U) -> Result<&Self>
    where
        U: FnOnce(Option<Value>) -> Value,
    {
        mutate::update(&self.data(), path, updater)?;
        Ok(self)
    }

    /// See [`mutate::update_with`].
    pub fn update_with<U, F>(&self, path: impl IntoPath, updater: U, customizer: F) -> Result<&Self>
    where
        U: FnOnce(Option<Value>) -> Value,
        F: FnMut(&SetStep<'_>) -> Option<Value>,
    {
        mutate::update_with(&self.data(), path, updater, customizer)?;
        Ok(self)
    }

    /// Replaces the root with a copy of itself without top-level `Null`
    /// entries.
    pub fn remove_null_or_undefined(&self) -> &Self {
        let stripped = self.defined();
        *self.data.borrow_mut() = stripped;
        self
    }

    // Combination

    /// See [`merge::assign`].
    pub fn assign(&self, sources: &[Value]) -> &Self {
        merge::assign(&self.data(), sources);
        self
    }

    /// See [`merge::assign_in`].
    pub fn assign_in(&self, sources: &[Value]) -> &Self {
        merge::assign_in(&self.data(), sources);
        self
    }

    /// See [`merge::assign_with`].
    pub fn assign_with<F>(&self, sources: &[Value], customizer: F) -> &Self
    where
        F: FnMut(&MergeStep<'_>) -> Option<Value>,
    {
        merge::assign_with(&self.data(), sources, customizer);
        self
    }

    /// See [`merge::assign_in_with`].
    pub fn assign_in_with<F>(&self, sources: &[Value], customizer: F) -> &Self
    where
        F: FnMut(&MergeStep<'_>) -> Option<Value>,
    {
        merge::assign_in_with(&self.data(), sources, customizer);
        self
    }

    /// See [`merge::defaults`].
    pub fn defaults(&self, sources: &[Value]) -> &Self {
        merge::defaults(&self.data(), sources);
        self
    }

    /// See [`merge::defaults_deep`].
    pub fn defaults_deep(&self, sources: &[Value]) -> &Self {
        merge::defaults_deep(&self.data(), sources);
        self
    }

    /// See [`merge::merge`].
    pub fn merge(&self, sources: &[Value]) -> &Self {
        merge::merge(&self.data(), sources);
        self
    }

    /// See [`merge::merge_with`].
    pub fn merge_with<F>(&self, sources: &[Value], customizer: F) -> &Self
    where
        F: FnMut(&MergeStep<'_>) -> Option<Value>,
    {
        merge::merge_with(&self.data(), sources, customizer);
        self
    }

    // Copies

    /// Shallow copy of the root, see [`cloning::clone`].
    pub fn clone_data(&self) -> Value {
        cloning::clone(&self.data())
    }

    /// See [`cloning::clone_deep`].
    pub fn clone_deep(&self) -> Value {
        cloning::clone_deep(&self.data())
    }

    /// See [`cloning::clone_with`].
    pub fn clone_with<F>(&self, customizer: F) -> Value
    where
        F: FnMut(&CloneStep<'_>) -> Option<Value>,
    {
        cloning::clone_with(&self.data(), customizer)
    }

    /// See [`cloning::clone_deep_with`].
    pub fn clone_deep_with<F>(&self, customizer: F) -> Value
    where
        F: FnMut(&CloneStep<'_>) -> Option<Value>,
    {
        cloning::clone_deep_with(&self.data(), customizer)
    }

    /// See [`select::pick`].
    pub fn pick<P: IntoPath>(&self, paths: impl IntoIterator<Item = P>) -> Result<Value> {
        select::pick(&self.data(), paths)
    }

    /// [`Collection::pick`] wrapped in a new collection.
    pub fn collect<P: IntoPath>(&self, paths: impl IntoIterator<Item = P>) -> Result<Self> {
        Self::from_value(self.pick(paths)?)
    }

    /// See [`select::omit`].
    pub fn omit<P: IntoPath>(&self, paths: impl IntoIterator<Item = P>) -> Result<Value> {
        select::omit(&self.data(), paths)
    }

    /// [`Collection::omit`] wrapped in a new collection.
    pub fn forget<P: IntoPath>(&self, paths: impl IntoIterator<Item = P>) -> Result<Self> {
        Self::from_value(self.omit(paths)?)
    }

    /// See [`select::defined`].
    pub fn defined(&self) -> Value {
        select::defined(&self.data())
    }

    // Shape

    /// Own keys of an object root, or the indices of an array root.
    pub fn keys(&self) -> Vec<String> {
        match self.data() {
            Value::Object(object) => object.keys(),
            Value::Array(array) => (0..array.len()).map(|index| index.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Own values of an object root, or the elements of an array root.
    pub fn values(&self) -> Vec<Value> {
        match self.data() {
            Value::Object(object) => object.values(),
            Value::Array(array) => array.to_vec(),
            _ => Vec::new(),
        }
    }

    /// Number of own entries of the root.
    pub fn len(&self) -> usize {
        match self.data() {
            Value::Object(object) => object.len(),
            Value::Array(array) => array.len(),
            _ => 0,
        }
    }

    /// Returns true if the root has no own entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the root as pretty-printed JSON.
    ///
    /// # Errors
    /// Fails with [`crate::Error::Serialize`] if the root contains a cycle.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data())?)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Collection").field(&self.data()).finish()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data(), f)
    }
}
