//! Layout of the state snapshot read by the query layer.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

pub const DEFAULT_CONTENT_KEY: &str = "content";
pub const DEFAULT_QUERIES_KEY: &str = "queries";

/// Names of the state sections this crate reads.
///
/// The content section maps identifiers to documents; the queries section maps
/// canonical query keys to tracking entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateLayout {
    pub content_key: String,
    pub queries_key: String,
}

impl Default for StateLayout {
    fn default() -> Self {
        Self {
            content_key: DEFAULT_CONTENT_KEY.to_string(),
            queries_key: DEFAULT_QUERIES_KEY.to_string(),
        }
    }
}

impl StateLayout {
    /// Process-wide default layout, for callers that never configure one.
    pub fn shared_default() -> &'static StateLayout {
        static DEFAULT: OnceLock<StateLayout> = OnceLock::new();
        DEFAULT.get_or_init(StateLayout::default)
    }

    pub fn new(content_key: impl Into<String>, queries_key: impl Into<String>) -> Result<Self> {
        let layout = Self {
            content_key: content_key.into(),
            queries_key: queries_key.into(),
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Parses a layout from JSON. Missing keys fall back to the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(raw)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Loads a layout from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CacheError::ConfigNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let layout = Self::from_json_str(&raw)?;
        log::debug!(
            "loaded state layout from {}: content={} queries={}",
            path.display(),
            layout.content_key,
            layout.queries_key
        );
        Ok(layout)
    }

    fn validate(&self) -> Result<()> {
        if self.content_key.trim().is_empty() {
            return Err(CacheError::Config("contentKey must not be blank".to_string()));
        }
        if self.queries_key.trim().is_empty() {
            return Err(CacheError::Config("queriesKey must not be blank".to_string()));
        }
        if self.content_key == self.queries_key {
            log::warn!(
                "state layout uses '{}' for both content and queries",
                self.content_key
            );
        }
        Ok(())
    }
}
