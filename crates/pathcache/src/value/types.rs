//! Value representation and accessors.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Number;

/// Keyed mapping used by object values.
pub type Map = BTreeMap<String, Value>;

/// A JSON-compatible value.
///
/// Cloning a `Value` is cheap: arrays and objects are shared behind an `Arc`,
/// so a clone refers to the same container. Use [`super::deep_clone`] to get
/// independent containers.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<str>),
    Array(Arc<Vec<Value>>),
    Object(Arc<Map>),
}

/// The kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Returns true for arrays and objects.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn object(map: Map) -> Self {
        Value::Object(Arc::new(map))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    pub fn empty_object() -> Self {
        Value::object(Map::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(value) => value.as_f64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    /// Looks up a key on an object. Any other kind yields `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up an element of an array. Any other kind yields `None`.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// JavaScript-style truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(value) => *value,
            Value::Number(value) => value.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Value::String(value) => !value.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Returns a new object with `key` set to `value`.
    ///
    /// Sibling entries keep their identity; only the outer object is new.
    /// A non-object receiver is treated as an empty object.
    pub fn with_entry(&self, key: impl Into<String>, value: Value) -> Value {
        let mut map = self.as_object().cloned().unwrap_or_default();
        map.insert(key.into(), value);
        Value::object(map)
    }

    /// Returns a new object without `key`.
    pub fn without_entry(&self, key: &str) -> Value {
        let mut map = self.as_object().cloned().unwrap_or_default();
        map.remove(key);
        Value::object(map)
    }

    /// Returns a copy of `self` with `value` stored under the nested `keys`.
    ///
    /// Only the objects along `keys` are rebuilt. Everything else is shared
    /// with the receiver, which is what reference-identity observers rely on.
    pub fn assoc_in(&self, keys: &[&str], value: Value) -> Value {
        let Some((first, rest)) = keys.split_first() else {
            return value;
        };
        let child = match self.get(first) {
            Some(existing) => existing.assoc_in(rest, value),
            None => Value::Null.assoc_in(rest, value),
        };
        self.with_entry(*first, child)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    /// Non-finite numbers have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::object(map)
    }
}
