//! Scalar values the engine carries but never looks inside: callables and
//! opaque host objects.

use std::{any::Any, fmt, rc::Rc};

use super::Value;

type Callable = dyn Fn(&[Value]) -> crate::Result<Value>;

/// A callable stored inside a collection.
///
/// Functions are scalars: clone engines keep the same reference and merge
/// engines assign them instead of descending.
#[derive(Clone)]
pub struct Function {
    name: Option<String>,
    inner: Rc<Callable>,
}

impl Function {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> crate::Result<Value> + 'static,
    {
        Self {
            name: None,
            inner: Rc::new(f),
        }
    }

    /// Wraps a closure under a display name.
    pub fn named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> crate::Result<Value> + 'static,
    {
        Self {
            name: Some(name.into()),
            inner: Rc::new(f),
        }
    }

    /// Returns the display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> crate::Result<Value> {
        (self.inner)(args)
    }

    /// Returns true if both handles wrap the same closure.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[Function: {name}]"),
            None => write!(f, "[Function]"),
        }
    }
}

/// An arbitrary host value treated as an unclonable scalar, the stand-in for
/// class instances.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Rc<dyn Any>,
}

impl Opaque {
    /// Wraps a host value.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Rc::new(value),
        }
    }

    /// Returns the Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrows the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Returns true if both handles wrap the same value.
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Opaque: {}]", self.type_name)
    }
}
