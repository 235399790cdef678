//! Canonical query keys and remote-query tracking.

use crate::state::CacheState;

use super::expression::Query;

/// Field of a query-tracking entry set once the query was fetched remotely.
pub const QUERIED_REMOTE_FIELD: &str = "queriedRemote";

/// Renders `(name, value)` pairs as a canonical query string.
///
/// Names are sorted, values percent-encoded, and the result prefixed with
/// `?`. No pairs gives the empty string. Equal parameter sets always render
/// the same key, whatever order they come in.
pub fn canonical_query_key<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
    if pairs.is_empty() {
        return String::new();
    }
    pairs.sort_by(|(left, _), (right, _)| left.cmp(right));

    let joined = pairs
        .iter()
        .map(|(name, value)| format!("{name}={}", encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{joined}")
}

/// Characters `urlencoding` escapes that URI components leave literal.
const URI_COMPONENT_MARKS: &[(&str, &str)] = &[
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encodes a URI component: everything but `A-Z a-z 0-9 - _ . ~ ! ' ( ) *`.
fn encode_component(value: &str) -> String {
    URI_COMPONENT_MARKS
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, (escaped, mark)| {
            encoded.replace(escaped, mark)
        })
}

/// Canonical key of a query, usable to memoize query execution.
pub fn to_query_params(query: &Query) -> String {
    canonical_query_key(
        query
            .filters()
            .iter()
            .map(|filter| (filter.kind().as_str(), filter.argument())),
    )
}

/// Reports whether `query` has been marked as fetched from the remote source.
pub fn has_run_query(query: &Query, state: &CacheState<'_>) -> bool {
    let key = to_query_params(query);
    state
        .queries()
        .and_then(|tracked| tracked.get(&key))
        .and_then(|entry| entry.get(QUERIED_REMOTE_FIELD))
        .is_some_and(|flag| flag.is_truthy())
}
