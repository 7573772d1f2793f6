//! `serde_json` interop, enabled by the `json` feature.

use std::cell::RefCell;

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use super::{Array, Object, Value};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect::<Array>())
            }
            serde_json::Value::Object(map) => Value::Object(map.into_iter().collect::<Object>()),
        }
    }
}

/// Serializes a value while tracking the containers currently open, so a
/// back reference fails instead of recursing forever.
struct Tracked<'a> {
    value: &'a Value,
    open: &'a RefCell<Vec<usize>>,
}

impl Serialize for Tracked<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(id) = self.value.container_id() {
            if self.open.borrow().contains(&id) {
                return Err(S::Error::custom(
                    "cannot serialize a circular structure",
                ));
            }
            self.open.borrow_mut().push(id);
        }
        let result = match self.value {
            Value::Null | Value::Function(_) | Value::Opaque(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Array(array) => {
                let items = array.to_vec();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in &items {
                    seq.serialize_element(&Tracked {
                        value: item,
                        open: self.open,
                    })?;
                }
                seq.end()
            }
            Value::Object(object) => {
                // Functions are dropped from objects, like JSON.stringify
                let entries: Vec<_> = object
                    .entries()
                    .into_iter()
                    .filter(|(_, v)| !v.is_function())
                    .collect();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in &entries {
                    map.serialize_entry(
                        key,
                        &Tracked {
                            value: item,
                            open: self.open,
                        },
                    )?;
                }
                map.end()
            }
        };
        if self.value.is_container() {
            self.open.borrow_mut().pop();
        }
        result
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let open = RefCell::new(Vec::new());
        Tracked { value: self, open: &open }.serialize(serializer)
    }
}

impl Value {
    /// Converts into a `serde_json::Value`.
    ///
    /// # Errors
    /// Fails with [`crate::Error::Serialize`] if the value contains a cycle.
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Renders compact JSON text.
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
