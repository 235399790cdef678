//! Path and identifier addressing.
//!
//! Documents are addressed externally by slash paths (`/site/posts/1`) and
//! cached under dot identifiers (`site.posts.1`). Fields nested inside a
//! value are reached with a [`Selector`].

use std::fmt;

use crate::error::{CacheError, Result};
use crate::value::Value;

pub const PATH_SEPARATOR: char = '/';
pub const UID_SEPARATOR: char = '.';

// ---------------------------------------------------------------------------
// Path <-> identifier
// ---------------------------------------------------------------------------

/// Converts a slash path into a cache identifier.
///
/// Leading and trailing slashes are trimmed. An empty path is returned as is.
pub fn path_to_uid(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    path.trim_matches(PATH_SEPARATOR)
        .split(PATH_SEPARATOR)
        .collect::<Vec<_>>()
        .join(".")
}

/// Converts a cache identifier back into a slash path with a single leading
/// slash. An empty identifier is returned as is.
pub fn uid_to_path(uid: &str) -> String {
    if uid.is_empty() {
        return String::new();
    }
    let normalized = if uid.starts_with(UID_SEPARATOR) {
        uid.to_string()
    } else {
        format!("{UID_SEPARATOR}{uid}")
    };
    normalized
        .split(UID_SEPARATOR)
        .collect::<Vec<_>>()
        .join("/")
}

/// Rejects paths that do not start with `/` or that contain `//`.
pub fn validate_path(path: &str) -> Result<()> {
    if !path.starts_with(PATH_SEPARATOR) {
        return Err(CacheError::MissingLeadingSlash(path.to_string()));
    }
    if path.contains("//") {
        return Err(CacheError::RepeatedSlash(path.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// A single step of a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Segment that parses as an integer.
    Index(i64),
    Key(String),
}

impl PathSegment {
    /// Integer-looking segments always become indices, even when they will be
    /// applied to an object.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Key(raw.to_string()),
        }
    }

    fn select<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (self, value) {
            (PathSegment::Index(index), Value::Array(items)) => usize::try_from(*index)
                .ok()
                .and_then(|position| items.get(position)),
            // Objects have no indices; the integer is looked up by its
            // canonical spelling, so `01` reaches key `1`.
            (PathSegment::Index(index), Value::Object(map)) => map.get(&index.to_string()),
            (PathSegment::Key(key), Value::Object(map)) => map.get(key),
            // Selections borrow from the tree, so strings are not indexed by
            // character.
            _ => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{index}"),
            PathSegment::Key(key) => f.write_str(key),
        }
    }
}

/// An accessor path into a value, e.g. `data.items.0.title`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    segments: Vec<PathSegment>,
}

impl Selector {
    /// Selector that resolves to the value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dotted accessor. The empty string selects the root.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self::from_segments(dotted.split(UID_SEPARATOR))
    }

    /// Builds a selector from pre-split segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|segment| PathSegment::parse(segment.as_ref()))
                .collect(),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolves the selector against `value`, stopping at the first step that
    /// has nothing to resolve.
    pub fn select<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| segment.select(current))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&joined)
    }
}

impl From<&str> for Selector {
    fn from(dotted: &str) -> Self {
        Selector::parse(dotted)
    }
}

impl From<String> for Selector {
    fn from(dotted: String) -> Self {
        Selector::parse(&dotted)
    }
}

impl From<&[&str]> for Selector {
    fn from(segments: &[&str]) -> Self {
        Selector::from_segments(segments)
    }
}

impl From<Vec<&str>> for Selector {
    fn from(segments: Vec<&str>) -> Self {
        Selector::from_segments(segments)
    }
}

impl From<Vec<String>> for Selector {
    fn from(segments: Vec<String>) -> Self {
        Selector::from_segments(segments)
    }
}

/// Resolves a dotted accessor or segment list against `value`.
pub fn select_by_path(selector: impl Into<Selector>, value: &Value) -> Option<&Value> {
    selector.into().select(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    // --- Path conversion ---

    #[test]
    fn path_to_uid_trims_slashes() {
        assert_eq!(path_to_uid("/a/b/c"), "a.b.c");
        assert_eq!(path_to_uid("a/b/"), "a.b");
        assert_eq!(path_to_uid("///a///"), "a");
        assert_eq!(path_to_uid(""), "");
    }

    #[test]
    fn uid_to_path_adds_single_leading_slash() {
        assert_eq!(uid_to_path("a.b.c"), "/a/b/c");
        assert_eq!(uid_to_path(".a.b"), "/a/b");
        assert_eq!(uid_to_path(""), "");
    }

    #[test]
    fn well_formed_paths_round_trip() {
        for path in ["/a", "/a/b", "/site/posts/2024/hello-world", "/x/0/y"] {
            validate_path(path).unwrap();
            assert_eq!(uid_to_path(&path_to_uid(path)), path);
        }
    }

    #[test]
    fn identifiers_round_trip() {
        for uid in ["a", "a.b", "site.posts.1", "x.0.y"] {
            assert_eq!(path_to_uid(&uid_to_path(uid)), uid);
        }
    }

    // --- Validation ---

    #[test]
    fn validate_requires_leading_slash() {
        let err = validate_path("a/b").unwrap_err();
        assert!(matches!(err, CacheError::MissingLeadingSlash(_)));
        assert!(err.is_invalid_path());
        assert!(validate_path("").is_err());
    }

    #[test]
    fn validate_rejects_repeated_slashes() {
        let err = validate_path("/a//b").unwrap_err();
        assert!(matches!(err, CacheError::RepeatedSlash(_)));
        assert_eq!(
            err.to_string(),
            "Invalid path '/a//b'. Paths must not have more than one '/' in a row."
        );
    }

    #[test]
    fn validate_accepts_trailing_slash() {
        assert!(validate_path("/a/b/").is_ok());
    }

    // --- Selection ---

    #[test]
    fn selects_nested_keys_and_indices() {
        let doc = value(json!({"data": {"items": [{"title": "first"}, {"title": "second"}]}}));
        assert_eq!(
            select_by_path("data.items.1.title", &doc),
            Some(&Value::from("second"))
        );
        assert_eq!(
            select_by_path(vec!["data", "items", "0", "title"], &doc),
            Some(&Value::from("first"))
        );
    }

    #[test]
    fn empty_selector_returns_value() {
        let doc = value(json!({"a": 1}));
        assert_eq!(select_by_path(Vec::<String>::new(), &doc), Some(&doc));
        assert_eq!(select_by_path("", &doc), Some(&doc));
        assert!(Selector::parse("").is_root());
    }

    #[test]
    fn missing_steps_short_circuit() {
        let doc = value(json!({"a": {"b": null}}));
        assert_eq!(select_by_path("a.x.y.z", &doc), None);
        assert_eq!(select_by_path("a.b.c", &doc), None);
        assert_eq!(select_by_path("a.b", &doc), Some(&Value::Null));
    }

    #[test]
    fn numeric_segments_are_indices_even_on_objects() {
        let doc = value(json!({"1": "one", "list": ["zero", "one"]}));
        assert_eq!(
            Selector::parse("01").segments(),
            &[PathSegment::Index(1)]
        );
        assert_eq!(select_by_path("01", &doc), Some(&Value::from("one")));
        assert_eq!(select_by_path("list.-1", &doc), None);
        assert_eq!(select_by_path("list.length", &doc), None);
    }

    #[test]
    fn primitives_have_no_fields() {
        let doc = value(json!({"name": "abc", "n": 3, "flag": true}));
        assert_eq!(select_by_path("name.0", &doc), None);
        assert_eq!(select_by_path("name.length", &doc), None);
        assert_eq!(select_by_path("n.0", &doc), None);
        assert_eq!(select_by_path("flag.x", &doc), None);
    }

    #[test]
    fn selector_display_joins_segments() {
        let selector = Selector::from_segments(["data", "items", "3"]);
        assert_eq!(selector.to_string(), "data.items.3");
    }
}
