//! Registration surface.
//!
//! `App` accumulates routes and middleware into two append-only tables.
//! [`App::build`] seals them into a [`Dispatcher`]; nothing can be added
//! afterwards.
//!
//! ```ignore
//! let mut app = App::new();
//! app.use_all(vec![from_fn(log_request)])?
//!     .get("/users/:id", get_user)?
//!     .route(Method::POST, "/users", create_user, vec![from_fn(require_auth)])?
//!     .on_error(|_req, _ctx, err| async move { Response::text(StatusCode::BAD_GATEWAY, err.to_string()) });
//! let dispatcher = app.build();
//! ```

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use http::Method;

use crate::config::RouterConfig;
use crate::dispatch::dispatcher::{Dispatcher, ErrorHandler};
use crate::dispatch::Context;
use crate::error::{BoxError, HandlerResult, Result};
use crate::http::{Request, Response};
use crate::middleware::{handler_fn, Diagnostics, MiddlewareRegistry, SharedMiddleware};
use crate::routing::{Route, RouteTable};

/// Builder for a dispatcher.
pub struct App {
    config: RouterConfig,
    routes: RouteTable,
    middleware: MiddlewareRegistry,
    error_handler: Option<ErrorHandler>,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create an app; with `extended` set the diagnostics middleware is
    /// registered globally before anything else.
    pub fn with_config(config: RouterConfig) -> Self {
        let mut middleware = MiddlewareRegistry::new();
        if config.extended {
            let diagnostics: SharedMiddleware =
                Arc::new(Diagnostics::from_config(&config.diagnostics));
            middleware.register_one("/", diagnostics);
        }
        Self {
            config,
            routes: RouteTable::new(),
            middleware,
            error_handler: None,
        }
    }

    /// Register a route with route-local middleware.
    pub fn route<F, Fut>(
        &mut self,
        method: Method,
        path: &str,
        handler: F,
        middlewares: Vec<SharedMiddleware>,
    ) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let route = Route::new(method, path, handler_fn(handler), middlewares)?;
        tracing::debug!(method = %route.method(), path = %route.pathname(), "Route registered");
        self.routes.push(route);
        Ok(self)
    }

    pub fn head<F, Fut>(&mut self, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::HEAD, path, handler, Vec::new())
    }

    pub fn get<F, Fut>(&mut self, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::GET, path, handler, Vec::new())
    }

    pub fn post<F, Fut>(&mut self, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::POST, path, handler, Vec::new())
    }

    pub fn put<F, Fut>(&mut self, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::PUT, path, handler, Vec::new())
    }

    pub fn patch<F, Fut>(&mut self, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::PATCH, path, handler, Vec::new())
    }

    pub fn delete<F, Fut>(&mut self, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::DELETE, path, handler, Vec::new())
    }

    pub fn options<F, Fut>(&mut self, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::OPTIONS, path, handler, Vec::new())
    }

    /// Register global middleware (prefix `/`).
    pub fn use_all(&mut self, middlewares: Vec<SharedMiddleware>) -> Result<&mut Self> {
        self.use_at("/", middlewares)
    }

    /// Register middleware for every path under `prefix`.
    pub fn use_at(&mut self, prefix: &str, middlewares: Vec<SharedMiddleware>) -> Result<&mut Self> {
        self.middleware.register(prefix, middlewares)?;
        Ok(self)
    }

    /// Handle failures raised anywhere in a chain. Replaces any earlier handler.
    pub fn on_error<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Request, Context, BoxError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let wrapped: ErrorHandler = Arc::new(
            move |req: Request, ctx: Context, err: BoxError| -> BoxFuture<'static, Response> {
                Box::pin(handler(req, ctx, err))
            },
        );
        self.error_handler = Some(wrapped);
        self
    }

    /// Seal the tables into a dispatcher.
    pub fn build(self) -> Dispatcher {
        tracing::debug!(
            routes = self.routes.len(),
            middleware_entries = self.middleware.len(),
            extended = self.config.extended,
            "Router sealed"
        );
        Dispatcher::new(self.config, self.routes, self.middleware, self.error_handler)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
