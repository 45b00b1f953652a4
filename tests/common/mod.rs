//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use http::StatusCode;
use lambda_router::middleware::SharedMiddleware;
use lambda_router::{from_fn, Context, HandlerResult, Next, Request, Response};

/// Ordered log of which middleware/handler ran.
pub type Trace = Arc<Mutex<Vec<String>>>;

pub fn trace() -> Trace {
    Arc::default()
}

pub fn entries(trace: &Trace) -> Vec<String> {
    trace.lock().unwrap().clone()
}

/// Build an event the way the invocation payload would arrive.
pub fn event(method: &str, path: &str) -> Request {
    let raw = serde_json::json!({
        "version": "2.0",
        "rawPath": path,
        "rawQueryString": "",
        "headers": { "host": "example.com" },
        "requestContext": { "http": { "method": method, "path": path } },
    });
    serde_json::from_value(raw).unwrap()
}

/// Middleware that records `name` before and after calling `next`.
pub fn recording(trace: &Trace, name: &'static str) -> SharedMiddleware {
    let trace = Arc::clone(trace);
    from_fn(move |req, ctx, next: Next| {
        let trace = Arc::clone(&trace);
        async move {
            trace.lock().unwrap().push(name.to_string());
            next.run(req, ctx).await
        }
    })
}

/// Handler returning `body` with 200.
pub fn reply(
    body: &'static str,
) -> impl Fn(Request, Context) -> std::future::Ready<HandlerResult> + Send + Sync + 'static {
    move |_req, _ctx| std::future::ready(Ok(Response::text(StatusCode::OK, body)))
}
