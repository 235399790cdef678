//! Document shape, validation and result reshaping.
//!
//! A cached document is an object with exactly the fields `type` and `data`.
//! Results handed to consumers are annotated either with the identifier they
//! were cached under (`id`) or with the equivalent slash path (`path`).

use serde::{Deserialize, Serialize};

use crate::address::uid_to_path;
use crate::value::{deep_clone, Value};

pub const TYPE_FIELD: &str = "type";
pub const DATA_FIELD: &str = "data";
pub const ID_FIELD: &str = "id";
pub const PATH_FIELD: &str = "path";

const DOCUMENT_FIELDS: &[&str] = &[TYPE_FIELD, DATA_FIELD];

/// Typed view of a cached document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Document {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: Some(kind.into()),
            data,
        }
    }

    /// The placeholder document: no type, no data.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Reads a document out of a value with a valid shape.
    ///
    /// Returns `None` when the shape is invalid or `type` is neither a string
    /// nor `null`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !is_valid_document(value) {
            return None;
        }
        let kind = match value.get(TYPE_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(kind)) => Some(kind.to_string()),
            Some(_) => return None,
        };
        let data = value.get(DATA_FIELD).cloned().unwrap_or_default();
        Some(Self { kind, data })
    }

    pub fn to_value(&self) -> Value {
        let kind = self.kind.as_deref().map_or(Value::Null, Value::from);
        Value::empty_object()
            .with_entry(TYPE_FIELD, kind)
            .with_entry(DATA_FIELD, self.data.clone())
    }
}

/// Result of a query: one slot per identifier, `None` where nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub items: Vec<Option<Value>>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the slots that hold a document.
    pub fn present(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().flatten()
    }
}

/// True when `value` is an object with at least one field and no fields other
/// than `type` and `data`.
pub fn is_valid_document(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    !map.is_empty() && map.keys().all(|key| DOCUMENT_FIELDS.contains(&key.as_str()))
}

/// `{type: null, data: null}`.
pub fn make_blank_item() -> Value {
    Document::blank().to_value()
}

/// Returns a fresh copy of `item` tagged with `id = uid`.
///
/// A `null` item stays `null`; a missing item yields just `{id}`.
pub fn make_item_with(uid: &str, item: Option<&Value>) -> Value {
    match item {
        Some(Value::Null) => Value::Null,
        Some(item @ Value::Object(_)) => deep_clone(item).with_entry(ID_FIELD, Value::from(uid)),
        _ => Value::empty_object().with_entry(ID_FIELD, Value::from(uid)),
    }
}

/// Replaces the `id` of an item with the matching slash `path`.
///
/// Falsy items are returned unchanged. The returned object is always new; the
/// input is left untouched.
pub fn item_uid_to_path(item: Option<&Value>) -> Option<Value> {
    let item = item?;
    if !item.is_truthy() {
        return Some(item.clone());
    }
    let path = item.get(ID_FIELD).and_then(Value::as_str).map(uid_to_path);
    let mut transformed = item.without_entry(ID_FIELD);
    if let Some(path) = path {
        transformed = transformed.with_entry(PATH_FIELD, Value::from(path));
    }
    Some(transformed)
}

/// Applies [`item_uid_to_path`] to every slot of a result.
pub fn query_results_to_path(results: &QueryResult) -> QueryResult {
    QueryResult {
        items: results
            .items
            .iter()
            .map(|item| item_uid_to_path(item.as_ref()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::same_reference;
    use serde_json::json;

    fn value(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    #[test]
    fn validation_accepts_type_and_data_only() {
        assert!(is_valid_document(&value(json!({"type": "post", "data": 1}))));
        assert!(is_valid_document(&value(json!({"type": null}))));
        assert!(is_valid_document(&value(json!({"data": {"nested": true}}))));
    }

    #[test]
    fn validation_rejects_other_shapes() {
        assert!(!is_valid_document(&value(json!({}))));
        assert!(!is_valid_document(&value(json!({"type": "post", "data": 1, "id": "a"}))));
        assert!(!is_valid_document(&value(json!(null))));
        assert!(!is_valid_document(&value(json!(["type"]))));
        assert!(!is_valid_document(&value(json!("type"))));
    }

    #[test]
    fn blank_item() {
        assert_eq!(make_blank_item(), value(json!({"type": null, "data": null})));
        assert_eq!(Document::from_value(&make_blank_item()), Some(Document::blank()));
    }

    #[test]
    fn document_round_trip_through_value() {
        let doc = Document::new("post", value(json!({"title": "hi"})));
        let raw = doc.to_value();
        assert_eq!(raw, value(json!({"type": "post", "data": {"title": "hi"}})));
        assert_eq!(Document::from_value(&raw), Some(doc));
        assert_eq!(Document::from_value(&value(json!({"type": 4}))), None);
    }

    #[test]
    fn document_deserializes_from_json() {
        let doc: Document = serde_json::from_value(json!({"type": "comment", "data": [1, 2]})).unwrap();
        assert_eq!(doc.kind.as_deref(), Some("comment"));
        assert_eq!(doc.data, value(json!([1, 2])));
    }

    #[test]
    fn document_rejects_extra_fields_when_deserializing() {
        let raw = json!({"type": "post", "data": 1, "id": "a"});
        assert!(serde_json::from_value::<Document>(raw.clone()).is_err());
        assert!(!is_valid_document(&value(raw)));
    }

    #[test]
    fn make_item_with_tags_a_fresh_copy() {
        let item = value(json!({"type": "post", "data": {"n": 1}}));
        let tagged = make_item_with("a.b", Some(&item));

        assert_eq!(tagged, value(json!({"type": "post", "data": {"n": 1}, "id": "a.b"})));
        assert!(item.get(ID_FIELD).is_none());
        assert!(!same_reference(item.get("data"), tagged.get("data")));
    }

    #[test]
    fn make_item_with_null_and_missing() {
        assert_eq!(make_item_with("a", Some(&Value::Null)), Value::Null);
        assert_eq!(make_item_with("a", None), value(json!({"id": "a"})));
    }

    #[test]
    fn item_uid_to_path_swaps_id_for_path() {
        let item = value(json!({"id": "a.b", "type": "post", "data": 1}));
        let shaped = item_uid_to_path(Some(&item)).unwrap();

        assert_eq!(shaped, value(json!({"path": "/a/b", "type": "post", "data": 1})));
        assert_eq!(item.get(ID_FIELD), Some(&Value::from("a.b")));
    }

    #[test]
    fn item_uid_to_path_passes_falsy_items_through() {
        assert_eq!(item_uid_to_path(None), None);
        assert_eq!(item_uid_to_path(Some(&Value::Null)), Some(Value::Null));
    }

    #[test]
    fn query_results_to_path_keeps_holes() {
        let results = QueryResult {
            items: vec![
                Some(value(json!({"id": "a", "type": "post", "data": 1}))),
                None,
            ],
        };
        let shaped = query_results_to_path(&results);
        assert_eq!(shaped.len(), 2);
        assert_eq!(shaped.items[0], Some(value(json!({"path": "/a", "type": "post", "data": 1}))));
        assert_eq!(shaped.items[1], None);
        assert_eq!(shaped.present().count(), 1);
    }
}
