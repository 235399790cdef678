//! In-memory query and change-observation layer for a path-addressed
//! document cache.
//!
//! This crate provides:
//! - Addressing: slash paths, dot identifiers and nested field selectors
//! - JSON-compatible values with structural equality and deep cloning
//! - Structural queries (`parent`, `ancestor`, `type`) over the flat cache
//! - Canonical query keys and remote-query tracking
//! - Reference-identity change observation over a state container
//! - Document shape validation and result reshaping

pub mod address;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod observer;
pub mod query;
pub mod state;
pub mod value;

// Re-export main types
pub use address::{path_to_uid, select_by_path, uid_to_path, validate_path, PathSegment, Selector};
pub use config::StateLayout;
pub use dispatch::{run_dispatch_and_expect, Dispatch, DispatchRejection};
pub use document::{is_valid_document, Document, QueryResult};
pub use error::{CacheError, Result};
pub use observer::{wrap, MemoryStore, ObservationHandle, StateContainer, StoreObserver};
pub use query::{
    find_data_in_state, has_run_query, matches_query, select_data_from_state, to_query_params,
    uids_to_response, FilterKind, Query, QueryFilter,
};
pub use state::CacheState;
pub use value::{deep_clone, deep_equal, Value, ValueKind};
