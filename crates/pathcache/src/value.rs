//! JSON-compatible values for cached state.
//!
//! This module provides:
//! - A tagged value type whose arrays and objects are reference counted,
//!   so snapshots share untouched subtrees and keep their identity
//! - A kind classifier used by equality and cloning
//! - Structural equality, deep cloning and reference-identity checks
//! - Conversion to and from `serde_json` values

mod compare;
mod convert;
mod types;

pub use compare::{deep_clone, deep_equal, same_reference};
pub use types::{Map, Value, ValueKind};
