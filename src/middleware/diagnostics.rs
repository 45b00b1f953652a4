//! Correlation id and timing headers.
//!
//! # Responsibilities
//! - Generate a fresh request id (UUID v4) per invocation
//! - Forward it to the rest of the chain as a request header
//! - Stamp it, a powered-by marker and the elapsed time on the response
//!
//! # Design Decisions
//! - Installed once under `/` before any user middleware
//! - Headers are added to whatever the chain returned; a same-named header
//!   (any case) is overwritten, others are kept
//! - Failures from the inner chain pass through unstamped

use std::time::Instant;

use futures_util::future::BoxFuture;
use uuid::Uuid;

use crate::config::DiagnosticsConfig;
use crate::dispatch::Context;
use crate::error::HandlerResult;
use crate::http::Request;
use crate::middleware::{Middleware, Next};

/// Default request id header.
pub const X_REQUEST_ID: &str = "x-request-id";
pub const X_POWERED_BY: &str = "x-powered-by";
/// Elapsed time in whole milliseconds, e.g. `12ms`.
pub const X_RESPONSE_TIME: &str = "x-response-time";

#[derive(Debug, Clone)]
pub struct Diagnostics {
    request_id_header: String,
    powered_by: String,
}

impl Diagnostics {
    pub fn new(request_id_header: impl Into<String>, powered_by: impl Into<String>) -> Self {
        Self {
            request_id_header: request_id_header.into(),
            powered_by: powered_by.into(),
        }
    }

    pub fn from_config(config: &DiagnosticsConfig) -> Self {
        Self::new(&config.request_id_header, &config.powered_by)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::from_config(&DiagnosticsConfig::default())
    }
}

impl Middleware for Diagnostics {
    fn call(&self, mut req: Request, ctx: Context, next: Next) -> BoxFuture<'static, HandlerResult> {
        let header = self.request_id_header.clone();
        let powered_by = self.powered_by.clone();
        Box::pin(async move {
            let started = Instant::now();
            let request_id = Uuid::new_v4().to_string();
            req.set_header(header.clone(), request_id.clone());

            let res = next.run(req, ctx).await?;

            let elapsed_ms = started.elapsed().as_millis() as u64;
            tracing::trace!(request_id = %request_id, elapsed_ms, "Request completed");
            Ok(res
                .with_header(header, request_id)
                .with_header(X_POWERED_BY, powered_by)
                .with_header(X_RESPONSE_TIME, format!("{elapsed_ms}ms")))
        })
    }
}
