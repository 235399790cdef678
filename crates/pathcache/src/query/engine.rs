//! Query execution over the flat cache.

use crate::document::{QueryResult, ID_FIELD};
use crate::state::CacheState;
use crate::value::Value;

use super::evaluate::evaluate_slot;
use super::expression::Query;

/// Returns the identifiers of every cached document matching `query`, in
/// identifier order.
///
/// Filters narrow the candidate set one after another in query order. A state
/// without a cache section has no matches.
pub fn find_uids_in_state(query: &Query, state: &CacheState<'_>) -> Vec<String> {
    let Some(content) = state.content() else {
        return Vec::new();
    };

    let candidates: Vec<&String> = content.keys().collect();
    let total = candidates.len();
    let matched = query.filters().iter().fold(candidates, |uids, filter| {
        uids.into_iter()
            .filter(|uid| evaluate_slot(filter, content.get(uid.as_str()), uid))
            .collect()
    });

    log::debug!(
        "query '{}' matched {} of {} cached entries",
        query.to_query_params(),
        matched.len(),
        total
    );
    matched.into_iter().cloned().collect()
}

/// Runs `query` against the cache and returns the matching documents.
pub fn find_data_in_state(query: &Query, state: &CacheState<'_>) -> QueryResult {
    if state.content().is_none() {
        return QueryResult::empty();
    }
    let uids = find_uids_in_state(query, state);
    uids_to_response(&uids, state)
}

/// Maps identifiers to their cached documents, keeping a `None` hole for each
/// identifier that is not cached.
pub fn uids_to_response<S: AsRef<str>>(uids: &[S], state: &CacheState<'_>) -> QueryResult {
    QueryResult {
        items: uids
            .iter()
            .map(|uid| state.document(uid.as_ref()).cloned())
            .collect(),
    }
}

/// Looks up a single cached document.
pub fn select_data_from_state<'a>(uid: &str, state: &CacheState<'a>) -> Option<&'a Value> {
    state.document(uid)
}

/// Checks one document against a query. Absent and `null` documents never
/// match; use `Query::default()` for "no query".
pub fn matches_query(query: &Query, document: Option<&Value>, uid: &str) -> bool {
    query.matches(document, uid)
}

/// Checks an item tagged with its identifier (see
/// [`crate::document::make_item_with`]) against a query.
///
/// Items without a string `id` can only satisfy filters that ignore the
/// identifier.
pub fn item_matches_query(query: &Query, item: Option<&Value>) -> bool {
    let uid = item
        .and_then(|item| item.get(ID_FIELD))
        .and_then(Value::as_str)
        .unwrap_or_default();
    query.matches(item, uid)
}
