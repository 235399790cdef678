//! Evaluation of filters against a cached document.

use crate::document::TYPE_FIELD;
use crate::value::Value;

use super::filter::QueryFilter;
use super::path::{is_descendant_uid, is_direct_child_uid};

/// Evaluates one filter against a present document cached under `uid`.
pub fn evaluate_filter(filter: &QueryFilter, document: &Value, uid: &str) -> bool {
    match filter {
        QueryFilter::Parent { uid: parent } => is_direct_child_uid(uid, parent),
        QueryFilter::Ancestor { uid: ancestor } => is_descendant_uid(uid, ancestor),
        QueryFilter::Type(expected) => {
            document.get(TYPE_FIELD).and_then(Value::as_str) == Some(expected.as_str())
        }
    }
}

/// Evaluates a filter against a possibly missing document.
///
/// Missing and falsy documents never match.
pub fn evaluate_slot(filter: &QueryFilter, document: Option<&Value>, uid: &str) -> bool {
    match document {
        Some(document) if document.is_truthy() => evaluate_filter(filter, document, uid),
        _ => false,
    }
}
