//! Per-request context handed to middleware and handlers.

use std::collections::HashMap;

/// Values derived from one request. Built fresh for every dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Captured path parameters, percent-decoded.
    pub params: HashMap<String, String>,
    /// Query string pairs with non-empty values.
    pub query: HashMap<String, String>,
    /// Cookie pairs with non-empty values.
    pub cookie: HashMap<String, String>,
}

impl Context {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        self.cookie.get(name).map(String::as_str)
    }
}
