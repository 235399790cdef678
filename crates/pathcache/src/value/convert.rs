//! Bridges between `Value` and `serde`/`serde_json`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::{Map, Value};

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(value) => Value::Number(value),
            serde_json::Value::String(value) => Value::from(value),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::object(
                map.into_iter()
                    .map(|(key, item)| (key, Value::from(item)))
                    .collect::<Map>(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(inner) => serde_json::Value::Bool(*inner),
            Value::Number(inner) => serde_json::Value::Number(inner.clone()),
            Value::String(inner) => serde_json::Value::String(inner.to_string()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), serde_json::Value::from(item)))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Parses a JSON document.
    pub fn from_json_str(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Number(value) => value.serialize(serializer),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(items) => serializer.collect_seq(items.iter()),
            Value::Object(map) => serializer.collect_map(map.iter()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_renders_compact_json() {
        let value = Value::from(json!({"b": [1, "two"], "a": null}));
        assert_eq!(value.to_string(), r#"{"a":null,"b":[1,"two"]}"#);
    }

    #[test]
    fn parses_json_text() {
        let value = Value::from_json_str(r#"{"type": "post", "data": {"n": 1}}"#).unwrap();
        assert_eq!(value.get("type").and_then(Value::as_str), Some("post"));
        assert_eq!(value.to_json(), json!({"type": "post", "data": {"n": 1}}));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Value::from_json_str("{nope").unwrap_err();
        assert!(matches!(err, crate::CacheError::Serialization(_)));
    }
}
