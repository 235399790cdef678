//! Filter kinds and their lookup by name.

use std::fmt;

use crate::error::{CacheError, Result};

/// The closed set of filters a query can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    Parent,
    Ancestor,
    Type,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Parent, FilterKind::Ancestor, FilterKind::Type];

    /// The query parameter name of this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Ancestor => "ancestor",
            Self::Type => "type",
        }
    }

    /// Looks up a filter kind by parameter name.
    pub fn lookup(name: &str) -> Option<FilterKind> {
        match name {
            "parent" => Some(Self::Parent),
            "ancestor" => Some(Self::Ancestor),
            "type" => Some(Self::Type),
            _ => None,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single query constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryFilter {
    /// Direct children of the identifier.
    Parent { uid: String },
    /// Descendants of the identifier at any depth.
    Ancestor { uid: String },
    /// Documents whose `type` equals the argument.
    Type(String),
}

impl QueryFilter {
    /// Builds a filter from its parameter name and argument.
    pub fn parse(name: &str, argument: impl Into<String>) -> Result<Self> {
        let kind =
            FilterKind::lookup(name).ok_or_else(|| CacheError::UnknownFilter(name.to_string()))?;
        Ok(Self::of_kind(kind, argument))
    }

    pub fn of_kind(kind: FilterKind, argument: impl Into<String>) -> Self {
        let argument = argument.into();
        match kind {
            FilterKind::Parent => Self::Parent { uid: argument },
            FilterKind::Ancestor => Self::Ancestor { uid: argument },
            FilterKind::Type => Self::Type(argument),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Parent { .. } => FilterKind::Parent,
            Self::Ancestor { .. } => FilterKind::Ancestor,
            Self::Type(_) => FilterKind::Type,
        }
    }

    pub fn argument(&self) -> &str {
        match self {
            Self::Parent { uid } | Self::Ancestor { uid } => uid,
            Self::Type(kind) => kind,
        }
    }
}
