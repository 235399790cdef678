//! Queries: a conjunction of filters keyed by filter name.

use crate::error::{CacheError, Result};
use crate::value::Value;

use super::evaluate::evaluate_slot;
use super::filter::{FilterKind, QueryFilter};
use super::params::to_query_params;

/// A query over the flat cache.
///
/// Holds at most one filter per [`FilterKind`]; a document matches when every
/// filter does. The empty query matches every present document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<QueryFilter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter, replacing any existing filter of the same kind in place.
    pub fn with(mut self, filter: QueryFilter) -> Self {
        self.set(filter);
        self
    }

    pub fn set(&mut self, filter: QueryFilter) {
        match self
            .filters
            .iter_mut()
            .find(|existing| existing.kind() == filter.kind())
        {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    pub fn parent(uid: impl Into<String>) -> Self {
        Self::new().with(QueryFilter::Parent { uid: uid.into() })
    }

    pub fn ancestor(uid: impl Into<String>) -> Self {
        Self::new().with(QueryFilter::Ancestor { uid: uid.into() })
    }

    pub fn of_type(kind: impl Into<String>) -> Self {
        Self::new().with(QueryFilter::Type(kind.into()))
    }

    /// Builds a query from `(name, argument)` pairs.
    ///
    /// Unknown names are rejected. A repeated name keeps the last argument.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |query, (name, argument)| {
                Ok(query.with(QueryFilter::parse(name.as_ref(), argument)?))
            })
    }

    /// Builds a query from a JSON object of string arguments, e.g.
    /// `{"parent": "site.posts", "type": "post"}`. `null` is the empty query.
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::new());
        }
        let map = value.as_object().ok_or_else(|| {
            CacheError::InvalidQuery(format!("expected an object, got {}", value.kind().as_str()))
        })?;

        let mut query = Self::new();
        for (name, argument) in map {
            let argument = argument.as_str().ok_or_else(|| {
                CacheError::InvalidQuery(format!(
                    "{name}: expected a string argument, got {}",
                    argument.kind().as_str()
                ))
            })?;
            query.set(QueryFilter::parse(name, argument)?);
        }
        Ok(query)
    }

    pub fn filters(&self) -> &[QueryFilter] {
        &self.filters
    }

    pub fn get(&self, kind: FilterKind) -> Option<&QueryFilter> {
        self.filters.iter().find(|filter| filter.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Evaluates the whole query against one cache slot.
    pub fn matches(&self, document: Option<&Value>, uid: &str) -> bool {
        match document {
            None | Some(Value::Null) => false,
            Some(_) => self
                .filters
                .iter()
                .all(|filter| evaluate_slot(filter, document, uid)),
        }
    }

    /// Canonical key of this query. See [`to_query_params`].
    pub fn to_query_params(&self) -> String {
        to_query_params(self)
    }
}
