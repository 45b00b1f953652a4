//! Error types for the router.
//!
//! Two very different failure classes live here:
//! - [`RouteDefinitionError`]: raised while the route and middleware tables
//!   are being built. These are startup errors with no recovery path.
//! - [`BoxError`]: whatever a handler or middleware fails with at dispatch
//!   time. These never escape the dispatcher.

use thiserror::Error;

/// Error type returned by handlers and middleware.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of running a handler or a middleware chain.
pub type HandlerResult = std::result::Result<crate::http::Response, BoxError>;

/// Errors raised while registering routes or middleware.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteDefinitionError {
    /// A `:param` segment has an empty or malformed name.
    #[error("invalid parameter name {name:?} in route pattern {pattern:?}")]
    InvalidParam { pattern: String, name: String },

    /// `use_at`/`use_all` was called without any middleware.
    #[error("no middleware given for prefix {prefix:?}")]
    EmptyMiddleware { prefix: String },
}

/// Failure captured from a panicking handler or middleware.
#[derive(Debug, Error)]
#[error("handler panicked: {0}")]
pub struct PanicError(pub String);

/// Result type alias for registration calls.
pub type Result<T> = std::result::Result<T, RouteDefinitionError>;
