//! Middleware subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     use_all / use_at(prefix, [mw...])
//!     → registry.rs (append-only prefix entries)
//!
//! Dispatch:
//!     normalized path
//!     → registry.rs (select segment-bounded prefixes, shortest first)
//!     → [global..., route-local...]
//!     → compose() around the terminal handler
//!     → one callable chain
//! ```
//!
//! # Design Decisions
//! - Composition is a right fold: the last middleware wraps the terminal,
//!   the first middleware is outermost and runs first
//! - A middleware may act before `next`, after it, or skip it entirely
//! - Chains are built per request from shared `Arc`s; nothing is mutated

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::dispatch::Context;
use crate::error::HandlerResult;
use crate::http::Request;

pub mod diagnostics;
pub mod registry;

pub use diagnostics::Diagnostics;
pub use registry::MiddlewareRegistry;

/// Terminal of a chain: a route handler or a built-in fallback.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request, ctx: Context) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, req: Request, ctx: Context) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self)(req, ctx))
    }
}

/// A layer of the chain. Receives the rest of the chain as `next`.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, ctx: Context, next: Next) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut> Middleware for F
where
    F: Fn(Request, Context, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, req: Request, ctx: Context, next: Next) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self)(req, ctx, next))
    }
}

pub type SharedHandler = Arc<dyn Handler>;
pub type SharedMiddleware = Arc<dyn Middleware>;

/// Wrap a closure as a shareable middleware.
///
/// ```ignore
/// let mw = from_fn(|req, ctx, next: Next| async move {
///     let res = next.run(req, ctx).await?;
///     Ok(res.with_header("x-seen", "1"))
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> SharedMiddleware
where
    F: Fn(Request, Context, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a shareable handler.
pub fn handler_fn<F, Fut>(f: F) -> SharedHandler
where
    F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(f)
}

/// The remainder of a chain, as seen from inside a middleware.
#[derive(Clone)]
pub struct Next {
    inner: SharedHandler,
}

impl Next {
    /// Invoke the rest of the chain.
    pub async fn run(self, req: Request, ctx: Context) -> HandlerResult {
        self.inner.call(req, ctx).await
    }
}

/// A middleware bound to the chain it wraps.
struct Layered {
    middleware: SharedMiddleware,
    next: Next,
}

impl Handler for Layered {
    fn call(&self, req: Request, ctx: Context) -> BoxFuture<'static, HandlerResult> {
        self.middleware.call(req, ctx, self.next.clone())
    }
}

/// Fold `middlewares` around `terminal`, outermost first.
pub fn compose(middlewares: &[SharedMiddleware], terminal: SharedHandler) -> SharedHandler {
    middlewares.iter().rev().fold(terminal, |inner, middleware| {
        Arc::new(Layered {
            middleware: Arc::clone(middleware),
            next: Next { inner },
        })
    })
}
