//! Prefix-scoped middleware registry.
//!
//! # Responsibilities
//! - Record one entry per `use_at`/`use_all` call, never merging entries
//! - Select the entries whose prefix covers a normalized request path
//! - Order them from most general to most specific
//!
//! # Design Decisions
//! - Prefixes match on segment boundaries: `/api` covers `/api` and
//!   `/api/x` but not `/apikey`
//! - Ordering is by ascending prefix length; the sort is stable so equal
//!   lengths keep registration order

use std::fmt;

use crate::error::{Result, RouteDefinitionError};
use crate::middleware::SharedMiddleware;
use crate::routing::path::normalize;

/// Middleware registered under one prefix by a single call.
#[derive(Clone)]
pub struct MiddlewareEntry {
    prefix: String,
    middlewares: Vec<SharedMiddleware>,
}

impl MiddlewareEntry {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareEntry")
            .field("prefix", &self.prefix)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

/// Does `prefix` cover `path` on a segment boundary?
pub fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Append-only list of middleware entries.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareRegistry {
    entries: Vec<MiddlewareEntry>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `middlewares` under `prefix`.
    ///
    /// The prefix is normalized with trailing slashes removed. An empty
    /// middleware list is rejected.
    pub fn register(&mut self, prefix: &str, middlewares: Vec<SharedMiddleware>) -> Result<()> {
        let prefix = normalize(prefix, true);
        if middlewares.is_empty() {
            return Err(RouteDefinitionError::EmptyMiddleware { prefix });
        }
        self.entries.push(MiddlewareEntry {
            prefix,
            middlewares,
        });
        Ok(())
    }

    /// Register a single middleware under `prefix`; cannot be empty.
    pub fn register_one(&mut self, prefix: &str, middleware: SharedMiddleware) {
        self.entries.push(MiddlewareEntry {
            prefix: normalize(prefix, true),
            middlewares: vec![middleware],
        });
    }

    /// Entries covering `path`, most general first.
    pub fn matching(&self, path: &str) -> Vec<&MiddlewareEntry> {
        let mut selected: Vec<&MiddlewareEntry> = self
            .entries
            .iter()
            .filter(|entry| prefix_matches(&entry.prefix, path))
            .collect();
        selected.sort_by_key(|entry| entry.prefix.len());
        selected
    }

    /// Flattened global chain for `path`.
    pub fn resolve(&self, path: &str) -> Vec<SharedMiddleware> {
        self.matching(path)
            .into_iter()
            .flat_map(|entry| entry.middlewares.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
