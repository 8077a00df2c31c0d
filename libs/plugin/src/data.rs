//! String-keyed attribute accessor handed to resources by the host.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Errors raised when reading attributes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataError {
    /// The stored value has a different type than requested.
    #[error("attribute '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    /// Resource data must be built from a JSON object.
    #[error("resource data must be a JSON object")]
    NotAnObject,
}

/// Attribute values and identity of one managed record.
///
/// Mirrors the host's view of a resource: an identity string (empty while
/// the record does not exist remotely) plus attribute values keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: String,
    attributes: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data holding only an identity, as produced by passthrough import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Build from a JSON object. A string `id` key becomes the identity.
    pub fn from_json(value: Value) -> Result<Self, DataError> {
        let Value::Object(map) = value else {
            return Err(DataError::NotAnObject);
        };

        let mut data = Self::new();
        for (key, value) in map {
            if key == "id" {
                match value {
                    Value::String(id) => data.id = id,
                    Value::Number(n) => data.id = n.to_string(),
                    Value::Null => {}
                    _ => {
                        return Err(DataError::TypeMismatch {
                            key,
                            expected: "string",
                        })
                    }
                }
            } else {
                data.attributes.insert(key, value);
            }
        }
        Ok(data)
    }

    /// Snapshot as a JSON object, identity included when set.
    pub fn to_json(&self) -> Value {
        let mut map: serde_json::Map<String, Value> = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if self.has_id() {
            map.insert("id".to_string(), Value::String(self.id.clone()));
        }
        Value::Object(map)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mark the record as gone. The host plans re-creation on the next run.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Raw value, `None` when unset.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Value if it is set to something other than its type's zero value.
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !is_zero(v))
    }

    /// Whether the attribute was explicitly given a non-zero value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get_ok(key).is_some()
    }

    /// String attribute; `None` when unset or null.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, DataError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(DataError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
            }),
        }
    }

    /// Integer attribute; `None` when unset or null.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, DataError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| DataError::TypeMismatch {
                key: key.to_string(),
                expected: "integer",
            }),
            Some(_) => Err(DataError::TypeMismatch {
                key: key.to_string(),
                expected: "integer",
            }),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// Attribute names and values in key order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
