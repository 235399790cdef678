//! Structural queries over the flat cache.
//!
//! This module provides:
//! - Filter kinds (`parent`, `ancestor`, `type`) and their lookup by name
//! - Queries: conjunctions of filters, one per kind
//! - Evaluation of filters against a cached document and its identifier
//! - Query execution over a state snapshot
//! - Canonical query keys and remote-query tracking

mod engine;
mod evaluate;
mod expression;
mod filter;
mod params;
mod path;

pub use engine::{
    find_data_in_state, find_uids_in_state, item_matches_query, matches_query,
    select_data_from_state, uids_to_response,
};
pub use evaluate::evaluate_filter;
pub use expression::Query;
pub use filter::{FilterKind, QueryFilter};
pub use params::{canonical_query_key, has_run_query, to_query_params, QUERIED_REMOTE_FIELD};
pub use path::{is_descendant_uid, is_direct_child_uid};
