//! Lightweight request dispatch for HTTP-shaped invocation events.
//!
//! A single inbound [`Request`] record is normalized, matched against an
//! ordered route table, wrapped in prefix-scoped middleware and turned into
//! a [`Response`] record. Unmatched requests get a JSON 404 or 405.
//!
//! ```ignore
//! use lambda_router::{App, Context, Request, Response};
//! use http::StatusCode;
//!
//! let mut app = App::new();
//! app.get("/hello/:name", |_req: Request, ctx: Context| async move {
//!     let name = ctx.param("name").unwrap_or("world").to_string();
//!     Ok(Response::text(StatusCode::OK, format!("Hello, {name}!")))
//! })?;
//! let handler = app.build().into_handler();
//! let response = handler(Request::new("GET", "/hello/ferris")).await;
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod middleware;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use dispatch::{App, Context, Dispatcher};
pub use error::{BoxError, HandlerResult, RouteDefinitionError};
pub use crate::http::{Request, Response};
pub use middleware::{from_fn, Middleware, Next};
