//! Structural equality, deep cloning and reference identity.

use std::sync::Arc;

use super::types::{Map, Value};

/// Structural equality over JSON-compatible values.
///
/// Values of different kinds are never equal. Numbers compare numerically,
/// arrays element by element in order, objects by key set and then per key.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if a.kind() != b.kind() {
        return false;
    }

    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => left.as_f64() == right.as_f64(),
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Array(left), Value::Array(right)) => {
            Arc::ptr_eq(left, right)
                || (left.len() == right.len()
                    && left.iter().zip(right.iter()).all(|(l, r)| deep_equal(l, r)))
        }
        (Value::Object(left), Value::Object(right)) => {
            Arc::ptr_eq(left, right) || objects_equal(left, right)
        }
        _ => false,
    }
}

fn objects_equal(left: &Map, right: &Map) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter().all(|(key, value)| {
        right
            .get(key)
            .is_some_and(|other| deep_equal(value, other))
    })
}

/// Returns a structural copy whose arrays and objects share nothing with the
/// source. Primitives are returned as they are.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::array(items.iter().map(deep_clone).collect()),
        Value::Object(map) => Value::object(
            map.iter()
                .map(|(key, item)| (key.clone(), deep_clone(item)))
                .collect(),
        ),
        primitive => primitive.clone(),
    }
}

/// Reference identity as seen by change observers.
///
/// Primitives are identical when their values are; arrays and objects only
/// when they are the same container. An absent value is identical only to
/// another absent value.
pub fn same_reference(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(Value::Array(left)), Some(Value::Array(right))) => Arc::ptr_eq(left, right),
        (Some(Value::Object(left)), Some(Value::Object(right))) => Arc::ptr_eq(left, right),
        (Some(left), Some(right)) if !left.kind().is_container() => deep_equal(left, right),
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    #[test]
    fn kind_mismatch_is_unequal() {
        assert!(!deep_equal(&value(json!("1")), &value(json!(1))));
        assert!(!deep_equal(&value(json!([])), &value(json!({}))));
        assert!(!deep_equal(&value(json!(null)), &value(json!(false))));
        assert!(!deep_equal(&value(json!(0)), &value(json!(false))));
    }

    #[test]
    fn numbers_compare_numerically() {
        assert!(deep_equal(&value(json!(1)), &value(json!(1.0))));
        assert!(!deep_equal(&value(json!(1)), &value(json!(2))));
    }

    #[test]
    fn arrays_are_order_sensitive() {
        assert!(deep_equal(&value(json!([1, [2, 3]])), &value(json!([1, [2, 3]]))));
        assert!(!deep_equal(&value(json!([1, 2])), &value(json!([2, 1]))));
        assert!(!deep_equal(&value(json!([1, 2])), &value(json!([1, 2, 3]))));
    }

    #[test]
    fn objects_ignore_key_order() {
        let a = value(json!({"a": 1, "b": {"c": [1, 2]}}));
        let b = value(json!({"b": {"c": [1, 2]}, "a": 1}));
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn objects_need_same_key_set() {
        assert!(!deep_equal(&value(json!({"a": 1})), &value(json!({"a": 1, "b": 2}))));
        assert!(!deep_equal(&value(json!({"a": 1, "b": 2})), &value(json!({"a": 1}))));
        assert!(!deep_equal(&value(json!({"a": 1})), &value(json!({"b": 1}))));
        assert!(!deep_equal(&value(json!({"a": null})), &value(json!({"b": null}))));
    }

    #[test]
    fn clone_is_equal_but_unshared() {
        let original = value(json!({
            "type": "post",
            "data": {"tags": ["a", "b"], "meta": {"n": 1, "ok": true, "none": null}}
        }));
        let cloned = deep_clone(&original);

        assert!(deep_equal(&original, &cloned));
        assert!(!same_reference(Some(&original), Some(&cloned)));
        assert!(!same_reference(original.get("data"), cloned.get("data")));

        let mutated = cloned.assoc_in(&["data", "meta", "n"], Value::from(2_i64));
        assert_eq!(original.get("data").and_then(|d| d.get("meta")), Some(&value(json!({"n": 1, "ok": true, "none": null}))));
        assert!(!deep_equal(&original, &mutated));
    }

    #[test]
    fn clone_keeps_primitives() {
        for raw in [json!(null), json!(true), json!(3), json!("s")] {
            let v = value(raw);
            assert!(same_reference(Some(&v), Some(&deep_clone(&v))));
        }
    }

    #[test]
    fn reference_identity() {
        let shared = value(json!({"v": 1}));
        let alias = shared.clone();
        let rebuilt = value(json!({"v": 1}));

        assert!(same_reference(Some(&shared), Some(&alias)));
        assert!(!same_reference(Some(&shared), Some(&rebuilt)));
        assert!(same_reference(Some(&value(json!("x"))), Some(&value(json!("x")))));
        assert!(same_reference(None, None));
        assert!(!same_reference(Some(&Value::Null), None));
    }
}
