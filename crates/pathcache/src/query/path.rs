//! Structural relations between cache identifiers.

use crate::address::UID_SEPARATOR;

/// Checks if a candidate identifier lies anywhere below `ancestor`.
///
/// The prefix must end on a segment boundary, so `a.bc` is not below `a.b`,
/// and an identifier is never below itself.
pub fn is_descendant_uid(candidate: &str, ancestor: &str) -> bool {
    candidate
        .strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with(UID_SEPARATOR))
}

/// Checks if a candidate identifier is exactly one segment below `parent`.
pub fn is_direct_child_uid(candidate: &str, parent: &str) -> bool {
    candidate
        .strip_prefix(parent)
        .filter(|rest| rest.starts_with(UID_SEPARATOR))
        .is_some_and(|rest| rest.matches(UID_SEPARATOR).count() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendants_at_any_depth() {
        assert!(is_descendant_uid("a.b.c", "a.b"));
        assert!(is_descendant_uid("a.b.c.d", "a.b"));
    }

    #[test]
    fn descendant_needs_segment_boundary() {
        assert!(!is_descendant_uid("a.bc", "a.b"));
        assert!(!is_descendant_uid("a.b", "a.b"));
        assert!(!is_descendant_uid("x.a.b.c", "a.b"));
        assert!(!is_descendant_uid("a", "a.b"));
    }

    #[test]
    fn direct_children_only() {
        assert!(is_direct_child_uid("a.b.c", "a.b"));
        assert!(!is_direct_child_uid("a.b.c.d", "a.b"));
        assert!(!is_direct_child_uid("a.b", "a.b"));
        assert!(!is_direct_child_uid("a.bc", "a.b"));
    }
}
