//! The closed sum type of everything a collection can hold.
//!
//! A [`Value`] is either a scalar (null, boolean, number, text, function or
//! opaque host value) or a container ([`Object`] or [`Array`]). Containers
//! are shared handles: cloning a `Value` that holds a container clones the
//! handle, so the copy *aliases* the original and sees every later mutation.
//! Independent copies come from [`crate::cloning`].
//!
//! # Equality
//!
//! `PartialEq` is structural and cycle-safe, like a deep-equal assertion.
//! [`Value::strict_eq`] is identity for containers and functions and value
//! equality for primitives.
//!
//! ```
//! # use object_collection::value::{Object, Value};
//! let inner = Value::from(Object::from_iter([("x", 1)]));
//! let alias = inner.clone();
//! let copy = Value::from(Object::from_iter([("x", 1)]));
//!
//! assert!(inner.strict_eq(&alias));
//! assert!(!inner.strict_eq(&copy));
//! assert_eq!(inner, copy);
//! ```

use std::fmt;

mod array;
pub mod errors;
mod function;
#[cfg(feature = "json")]
mod json;
mod object;

pub use array::Array;
pub use errors::ValueError;
pub use function::{Function, Opaque};
pub use object::Object;

/// Values that can be stored in a collection.
#[derive(Clone)]
pub enum Value {
    // Scalars
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Stored callable
    Function(Function),
    /// Host value the engine never looks inside
    Opaque(Opaque),

    // Containers
    /// Ordered sequence
    Array(Array),
    /// Keyed mapping
    Object(Object),
}

impl Value {
    /// Creates a new empty object value.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Creates a new empty array value.
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    /// Returns true if this is an object or an array
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this is an object without a prototype
    pub fn is_plain_object(&self) -> bool {
        matches!(self, Value::Object(object) if object.is_plain())
    }

    /// Returns true if this is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is a function
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Function(_) => "function",
            Value::Opaque(_) => "opaque",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float; integers widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the array handle, if this is an array
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the function, if this is a function
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Strict equality: identity for containers, functions and opaque
    /// values; value equality for primitives.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
            (a, b) if a.is_container() || b.is_container() => false,
            (a, b) => a == b,
        }
    }

    /// Identity of a container's allocation.
    pub(crate) fn container_id(&self) -> Option<usize> {
        match self {
            Value::Object(object) => Some(object.id()),
            Value::Array(array) => Some(array.id()),
            _ => None,
        }
    }
}

fn structural_eq(a: &Value, b: &Value, visiting: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        (Value::Opaque(x), Value::Opaque(y)) => x.ptr_eq(y),
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.id(), y.id());
            // Already comparing this pair further up: assume equal
            if visiting.contains(&pair) {
                return true;
            }
            let entries = x.entries();
            if entries.len() != y.len() {
                return false;
            }
            visiting.push(pair);
            let equal = entries.iter().all(|(key, value)| {
                y.get(key)
                    .is_some_and(|other| structural_eq(value, &other, visiting))
            });
            visiting.pop();
            equal
        }
        (Value::Array(x), Value::Array(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.id(), y.id());
            if visiting.contains(&pair) {
                return true;
            }
            let (left, right) = (x.slots(), y.slots());
            if left.len() != right.len() {
                return false;
            }
            visiting.push(pair);
            // A hole only equals another hole
            let equal = left.iter().zip(&right).all(|pair| match pair {
                (Some(l), Some(r)) => structural_eq(l, r, visiting),
                (None, None) => true,
                _ => false,
            });
            visiting.pop();
            equal
        }
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        structural_eq(self, other, &mut Vec::new())
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, stack: &mut Vec<usize>) -> fmt::Result {
    if let Some(id) = value.container_id() {
        if stack.contains(&id) {
            return write!(f, "[Circular]");
        }
    }
    match value {
        Value::Null => write!(f, "null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(n) => write!(f, "{n}"),
        Value::Float(n) => write!(f, "{n}"),
        Value::Text(s) => write!(f, "{s:?}"),
        Value::Function(function) => write!(f, "{function:?}"),
        Value::Opaque(opaque) => write!(f, "{opaque:?}"),
        Value::Array(array) => {
            stack.push(array.id());
            write!(f, "[")?;
            for (i, item) in array.to_vec().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_value(f, item, stack)?;
            }
            stack.pop();
            write!(f, "]")
        }
        Value::Object(object) => {
            stack.push(object.id());
            write!(f, "{{")?;
            for (i, (key, item)) in object.entries().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key:?}: ")?;
                write_value(f, item, stack)?;
            }
            stack.pop();
            write!(f, "}}")
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Int(value as i64)
            }
        }
    )*};
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Float(value as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().collect())
    }
}

/// `None` becomes `Null`, the value `set_defined` skips.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

fn mismatch(expected: &str, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
    }
}

// TryFrom implementations for typed reads
impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(mismatch("String", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ValueError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(mismatch("&str", value)),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(mismatch("i64", value)),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_float().ok_or_else(|| mismatch("f64", value))
    }
}

impl TryFrom<&Value> for bool {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl TryFrom<&Value> for Object {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Ok(object.clone()),
            _ => Err(mismatch("Object", value)),
        }
    }
}

impl TryFrom<&Value> for Array {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(array) => Ok(array.clone()),
            _ => Err(mismatch("Array", value)),
        }
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Value::Int(n) => n == other,
            Value::Float(n) => *n == *other as f64,
            _ => false,
        }
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self == &(*other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_float().is_some_and(|n| n == *other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
