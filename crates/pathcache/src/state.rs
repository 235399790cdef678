//! Read-only view over a state snapshot.

use crate::config::StateLayout;
use crate::value::{Map, Value};

/// A state snapshot seen through a [`StateLayout`].
///
/// The view never mutates the snapshot. Sections that are missing, or that
/// are not objects, read as absent.
#[derive(Debug, Clone, Copy)]
pub struct CacheState<'a> {
    root: &'a Value,
    layout: &'a StateLayout,
}

impl<'a> CacheState<'a> {
    pub fn new(root: &'a Value, layout: &'a StateLayout) -> Self {
        Self { root, layout }
    }

    /// View through [`StateLayout::shared_default`].
    pub fn from_root(root: &'a Value) -> Self {
        Self::new(root, StateLayout::shared_default())
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn layout(&self) -> &'a StateLayout {
        self.layout
    }

    /// The identifier -> document section, if present.
    pub fn content(&self) -> Option<&'a Map> {
        self.root.get(&self.layout.content_key)?.as_object()
    }

    /// The canonical query key -> tracking entry section, if present.
    pub fn queries(&self) -> Option<&'a Map> {
        self.root.get(&self.layout.queries_key)?.as_object()
    }

    /// Looks up one cached document.
    pub fn document(&self, uid: &str) -> Option<&'a Value> {
        self.content()?.get(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_sections_through_layout() {
        let root = Value::from(json!({
            "items": {"a": {"type": "post", "data": 1}},
            "fetched": {"?type=post": {"queriedRemote": true}}
        }));
        let layout = StateLayout::new("items", "fetched").unwrap();
        let state = CacheState::new(&root, &layout);

        assert_eq!(state.content().map(Map::len), Some(1));
        assert_eq!(state.queries().map(Map::len), Some(1));
        assert!(state.document("a").is_some());
        assert!(state.document("b").is_none());
    }

    #[test]
    fn default_layout_view() {
        let root = Value::from(json!({"content": {"a": {"type": null}}}));
        let state = CacheState::from_root(&root);
        assert_eq!(state.layout().content_key, "content");
        assert!(state.document("a").is_some());
    }

    #[test]
    fn missing_or_malformed_sections_are_absent() {
        let layout = StateLayout::default();
        let root = Value::from(json!({"content": [1, 2]}));
        let state = CacheState::new(&root, &layout);
        assert!(state.content().is_none());
        assert!(state.queries().is_none());
        assert!(state.document("a").is_none());
    }
}
