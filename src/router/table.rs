//! Per-method route storage.
//!
//! Each method keeps two views of the same entries: an exact map keyed by
//! pattern, and a list ordered by descending weight for the prefix scan.
//! Both are updated together in [`RouteTable::insert`], so an entry is in the
//! map if and only if it is in the list.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use super::error::RouteError;
use super::weight::weight;
use crate::handler::Handler;

/// A registered route. Immutable once inserted.
pub struct RouteEntry {
    pub pattern: Arc<str>,
    pub handler: Handler,
    pub weight: usize,
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

/// How a route was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The path equals the pattern
    Exact,
    /// The pattern is a string prefix of the path
    Prefix,
}

/// Result of a successful resolution
#[derive(Clone)]
pub struct RouteMatch {
    pub pattern: Arc<str>,
    pub weight: usize,
    pub kind: MatchKind,
    pub handler: Handler,
}

impl std::fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("weight", &self.weight)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl RouteMatch {
    fn new(entry: &RouteEntry, kind: MatchKind) -> Self {
        Self {
            pattern: Arc::clone(&entry.pattern),
            weight: entry.weight,
            kind,
            handler: Arc::clone(&entry.handler),
        }
    }
}

#[derive(Default)]
struct MethodRoutes {
    exact: HashMap<Arc<str>, Arc<RouteEntry>>,
    by_weight: Vec<Arc<RouteEntry>>,
}

/// Append-only route storage. Not synchronised; `Router` owns it behind a lock.
#[derive(Default)]
pub struct RouteTable {
    methods: HashMap<Method, MethodRoutes>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidPattern`] if `pattern` does not start with `/`
    /// - [`RouteError::Conflict`] if `(method, pattern)` is already present;
    ///   the existing entry is left untouched
    pub fn insert(&mut self, method: Method, pattern: &str, handler: Handler) -> Result<usize, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::InvalidPattern {
                pattern: pattern.to_string(),
            });
        }

        let routes = self.methods.entry(method.clone()).or_default();
        if routes.exact.contains_key(pattern) {
            return Err(RouteError::Conflict {
                method,
                pattern: pattern.to_string(),
            });
        }

        let pattern: Arc<str> = Arc::from(pattern);
        let entry = Arc::new(RouteEntry {
            pattern: Arc::clone(&pattern),
            handler,
            weight: weight(&pattern),
        });
        let entry_weight = entry.weight;

        routes.exact.insert(pattern, Arc::clone(&entry));
        routes.by_weight.push(entry);
        // stable: equal weights keep registration order
        routes.by_weight.sort_by(|a, b| b.weight.cmp(&a.weight));

        Ok(entry_weight)
    }

    /// Find the route for `method` and `path`.
    ///
    /// An exact pattern match always wins. Otherwise the first entry in
    /// weight order whose pattern is a string prefix of `path` is returned.
    /// The prefix test is on raw strings, not path segments: `/use` matches
    /// `/user/1`.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let routes = self.methods.get(method)?;

        if let Some(entry) = routes.exact.get(path) {
            return Some(RouteMatch::new(entry, MatchKind::Exact));
        }

        routes
            .by_weight
            .iter()
            .find(|entry| path.starts_with(&*entry.pattern))
            .map(|entry| RouteMatch::new(entry, MatchKind::Prefix))
    }

    /// Patterns and weights for `method`, in prefix-scan order.
    #[must_use]
    pub fn entries(&self, method: &Method) -> Vec<(Arc<str>, usize)> {
        self.methods
            .get(method)
            .map(|routes| {
                routes
                    .by_weight
                    .iter()
                    .map(|e| (Arc::clone(&e.pattern), e.weight))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Methods with at least one route, sorted by name.
    #[must_use]
    pub fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self
            .methods
            .iter()
            .filter(|(_, routes)| !routes.by_weight.is_empty())
            .map(|(m, _)| m.clone())
            .collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Total number of routes across all methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.values().map(|r| r.by_weight.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.methods.values().all(|routes| {
            routes.exact.len() == routes.by_weight.len()
                && routes.by_weight.iter().all(|e| {
                    routes
                        .exact
                        .get(&e.pattern)
                        .is_some_and(|found| Arc::ptr_eq(found, e))
                })
                && routes
                    .by_weight
                    .windows(2)
                    .all(|pair| pair[0].weight >= pair[1].weight)
        })
    }
}
