//! Per-invocation dispatch.
//!
//! # Flow
//! ```text
//! NORMALIZE  raw path → canonical path + segments; query; cookie
//! MATCH      scan routes in registration order
//!   ├─ Found             → EXECUTE [global..., route-local...] → handler
//!   └─ none by method    → FALLBACK [global...] → 405 (Allow) | 404
//! RESPOND    whatever the outermost layer returned
//! ```
//!
//! # Design Decisions
//! - Tables are shared behind one `Arc`; clones are cheap and read-only
//! - Every chain runs inside one failure boundary: an `Err` or a panic goes
//!   to the error handler, or becomes a generic 500
//! - The error handler receives the request and context as they were before
//!   the chain ran

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use http::Method;

use crate::config::RouterConfig;
use crate::dispatch::Context;
use crate::error::{BoxError, HandlerResult, PanicError};
use crate::http::{parse_cookie, parse_query, Request, Response};
use crate::middleware::{compose, Handler, MiddlewareRegistry, SharedHandler};
use crate::routing::{normalize, split, RouteMatch, RouteTable};

/// Failure handler registered with `App::on_error`.
pub type ErrorHandler =
    Arc<dyn Fn(Request, Context, BoxError) -> BoxFuture<'static, Response> + Send + Sync>;

/// Built-in terminal used when no route was selected.
enum Fallback {
    NotFound,
    MethodNotAllowed(Vec<Method>),
}

impl Handler for Fallback {
    fn call(&self, _req: Request, _ctx: Context) -> BoxFuture<'static, HandlerResult> {
        let res = match self {
            Fallback::NotFound => Response::not_found(),
            Fallback::MethodNotAllowed(allowed) => {
                let names: Vec<&str> = allowed.iter().map(Method::as_str).collect();
                Response::method_not_allowed(&names)
            }
        };
        Box::pin(async move { Ok(res) })
    }
}

struct Inner {
    config: RouterConfig,
    routes: RouteTable,
    middleware: MiddlewareRegistry,
    error_handler: Option<ErrorHandler>,
}

/// Sealed, immutable router. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    pub(crate) fn new(
        config: RouterConfig,
        routes: RouteTable,
        middleware: MiddlewareRegistry,
        error_handler: Option<ErrorHandler>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                routes,
                middleware,
                error_handler,
            }),
        }
    }

    /// Dispatch one event to completion.
    pub async fn dispatch(&self, request: Request) -> Response {
        let path = normalize(&request.raw_path, self.inner.config.ignore_trailing_slash);
        let segments = split(&path);
        let query = parse_query(&request.raw_query_string);
        let cookie = request
            .cookie_header()
            .map(|raw| parse_cookie(&raw))
            .unwrap_or_default();

        tracing::debug!(method = %request.method(), path = %path, "Dispatching request");

        let mut chain = self.inner.middleware.resolve(&path);
        let (terminal, params) = match self.inner.routes.find(request.method(), &segments) {
            RouteMatch::Found { route, params } => {
                chain.extend(route.middlewares().iter().cloned());
                (route.handler(), params)
            }
            RouteMatch::MethodNotAllowed(allowed) => {
                tracing::debug!(path = %path, allowed = ?allowed, "Method not allowed");
                let terminal: SharedHandler = Arc::new(Fallback::MethodNotAllowed(allowed));
                (terminal, HashMap::new())
            }
            RouteMatch::NotFound => {
                tracing::debug!(path = %path, "No route matched");
                let terminal: SharedHandler = Arc::new(Fallback::NotFound);
                (terminal, HashMap::new())
            }
        };

        let ctx = Context {
            params,
            query,
            cookie,
        };
        self.execute(compose(&chain, terminal), request, ctx).await
    }

    async fn execute(&self, chain: SharedHandler, request: Request, ctx: Context) -> Response {
        let original = (request.clone(), ctx.clone());
        let run = async move { chain.call(request, ctx).await };

        let err: BoxError = match AssertUnwindSafe(run).catch_unwind().await {
            Ok(Ok(res)) => return res,
            Ok(Err(err)) => err,
            Err(payload) => {
                let err = PanicError(panic_message(payload.as_ref()));
                tracing::warn!(error = %err, "Recovered from panic in request chain");
                Box::new(err)
            }
        };

        let (request, ctx) = original;
        match &self.inner.error_handler {
            Some(handler) => handler(request, ctx, err).await,
            None => {
                tracing::error!(
                    error = %err,
                    method = %request.method(),
                    path = %request.raw_path,
                    "Unhandled error while dispatching request"
                );
                Response::internal_error()
            }
        }
    }

    /// Single `(event) -> response` entry point over this dispatcher.
    pub fn into_handler(self) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync {
        move |request: Request| -> BoxFuture<'static, Response> {
            let dispatcher = self.clone();
            Box::pin(async move { dispatcher.dispatch(request).await })
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.inner.config)
            .field("routes", &self.inner.routes.len())
            .field("middleware_entries", &self.inner.middleware.len())
            .field("error_handler", &self.inner.error_handler.is_some())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::App;
    use crate::middleware::{from_fn, Next};
    use http::StatusCode;

    #[tokio::test]
    async fn test_params_query_cookie_reach_handler() {
        let mut app = App::new();
        app.get("/users/:id", |_req, ctx: Context| async move {
            let body = format!(
                "{}|{}|{}",
                ctx.param("id").unwrap_or("-"),
                ctx.query_param("tab").unwrap_or("-"),
                ctx.cookie_value("sid").unwrap_or("-"),
            );
            Ok(Response::text(StatusCode::OK, body))
        })
        .unwrap();
        let dispatcher = app.build();

        let req = Request::new("GET", "/users/a%20b")
            .with_query("tab=posts")
            .with_header("Cookie", "sid=xyz; other=1");
        let res = dispatcher.dispatch(req).await;
        assert_eq!(res.status_code, 200);
        assert_eq!(res.body, "a b|posts|xyz");
    }

    #[tokio::test]
    async fn test_fallback_context_has_empty_params() {
        let mut app = App::new();
        app.use_all(vec![from_fn(|req, ctx: Context, next: Next| async move {
            let res = next.run(req, ctx.clone()).await?;
            Ok(res.with_header("x-params", ctx.params.len().to_string()))
        })])
        .unwrap();
        app.get("/items/:id", |_req, _ctx| async move { Ok(Response::default()) })
            .unwrap();
        let dispatcher = app.build();

        let res = dispatcher.dispatch(Request::new("PUT", "/items/7")).await;
        assert_eq!(res.status_code, 405);
        assert_eq!(res.header("x-params"), Some("0"));
    }

    #[tokio::test]
    async fn test_panic_becomes_500() {
        let mut app = App::new();
        app.get("/boom", |_req, _ctx| async move {
            if true {
                panic!("kaboom");
            }
            Ok(Response::default())
        })
        .unwrap();
        let res = app.build().dispatch(Request::new("GET", "/boom")).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body, r#"{"message":"Internal Server Error"}"#);
    }

    #[tokio::test]
    async fn test_panic_reaches_error_handler() {
        let mut app = App::new();
        app.get("/boom", |_req, _ctx| async move {
            if true {
                panic!("kaboom");
            }
            Ok(Response::default())
        })
        .unwrap();
        app.on_error(|_req, _ctx, err| async move {
            Response::text(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        });
        let res = app.build().dispatch(Request::new("GET", "/boom")).await;
        assert_eq!(res.status_code, 503);
        assert_eq!(res.body, "handler panicked: kaboom");
    }

    #[tokio::test]
    async fn test_into_handler() {
        let mut app = App::new();
        app.get("/", |_req, _ctx| async move {
            Ok(Response::text(StatusCode::OK, "root"))
        })
        .unwrap();
        let handler = app.build().into_handler();
        let res = handler(Request::new("GET", "")).await;
        assert_eq!(res.body, "root");
        let res = handler.clone()(Request::new("GET", "/nope")).await;
        assert_eq!(res.status_code, 404);
    }
}
