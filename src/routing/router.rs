//! Route table and lookup.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Look up the route for a method and segment list
//! - Report which methods matched structurally when none matched by method
//!
//! # Design Decisions
//! - Append-only while building, read-only once sealed in a dispatcher
//! - O(n) scan; first route matching both path and method wins
//! - Explicit NotFound / MethodNotAllowed rather than a silent default

use std::collections::HashMap;
use std::fmt;

use http::Method;

use crate::error::Result;
use crate::middleware::{SharedHandler, SharedMiddleware};
use crate::routing::matcher::{match_tokens, tokenize, Token};

/// A registered route.
pub struct Route {
    method: Method,
    pathname: String,
    tokens: Vec<Token>,
    middlewares: Vec<SharedMiddleware>,
    handler: SharedHandler,
}

impl Route {
    pub fn new(
        method: Method,
        pathname: &str,
        handler: SharedHandler,
        middlewares: Vec<SharedMiddleware>,
    ) -> Result<Self> {
        Ok(Self {
            method,
            pathname: pathname.to_string(),
            tokens: tokenize(pathname)?,
            middlewares,
            handler,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Route-local middleware, in registration order.
    pub fn middlewares(&self) -> &[SharedMiddleware] {
        &self.middlewares
    }

    pub fn handler(&self) -> SharedHandler {
        self.handler.clone()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pathname", &self.pathname)
            .field("tokens", &self.tokens)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

/// Outcome of a route lookup.
#[derive(Debug)]
pub enum RouteMatch<'a> {
    /// A route matched path and method.
    Found {
        route: &'a Route,
        params: HashMap<String, String>,
    },
    /// Routes matched the path, but only for these methods (discovery order).
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// Ordered collection of routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Find the route for `method` and the request's path segments.
    pub fn find(&self, method: &str, segments: &[&str]) -> RouteMatch<'_> {
        let mut allowed: Vec<Method> = Vec::new();
        for route in &self.routes {
            let Some(params) = match_tokens(&route.tokens, segments) else {
                continue;
            };
            if route.method.as_str() == method {
                return RouteMatch::Found { route, params };
            }
            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }
        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            RouteMatch::MethodNotAllowed(allowed)
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
