//! lambda-router CLI.
//!
//! Runs one invocation event through a small demo application and prints
//! the response record as JSON. Useful for checking routing, middleware
//! ordering and fallback behaviour without deploying anything.
//!
//! ```text
//! lambda-router --config router.toml --event event.json
//! echo '{"rawPath":"/users/7","requestContext":{"http":{"method":"GET"}}}' | lambda-router
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use http::StatusCode;
use serde_json::json;

use lambda_router::config::{load_config, RouterConfig};
use lambda_router::observability::logging;
use lambda_router::{from_fn, App, Context, Next, Request, Response, RouteDefinitionError};

#[derive(Parser)]
#[command(name = "lambda-router")]
#[command(about = "Dispatch an invocation event through the demo router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Event JSON file; `-` reads stdin.
    #[arg(short, long, default_value = "-")]
    event: String,

    /// Pretty-print the response.
    #[arg(long)]
    pretty: bool,
}

fn demo_app(config: RouterConfig) -> Result<App, RouteDefinitionError> {
    let mut app = App::with_config(config);

    app.use_all(vec![from_fn(|req: Request, ctx, next: Next| async move {
        tracing::info!(method = %req.method(), path = %req.raw_path, "Request received");
        let res = next.run(req, ctx).await?;
        tracing::info!(status = res.status_code, "Response ready");
        Ok(res)
    })])?;

    app.use_at(
        "/admin",
        vec![from_fn(|req: Request, ctx, next: Next| async move {
            if req.header("authorization").is_none() {
                return Ok(Response::message(StatusCode::UNAUTHORIZED, "Unauthorized"));
            }
            next.run(req, ctx).await
        })],
    )?;

    app.get("/health", |_req, _ctx| async move {
        Ok(Response::json(StatusCode::OK, &json!({ "status": "ok" }))?)
    })?
    .get("/users/:id", |_req, ctx: Context| async move {
        let body = json!({
            "id": ctx.param("id"),
            "query": ctx.query,
            "cookie": ctx.cookie,
        });
        Ok(Response::json(StatusCode::OK, &body)?)
    })?
    .post("/echo", |req: Request, _ctx| async move {
        Ok(Response::text(StatusCode::OK, req.body.unwrap_or_default()))
    })?
    .get("/admin/stats", |_req, _ctx| async move {
        Ok(Response::json(StatusCode::OK, &json!({ "routes": 4 }))?)
    })?;

    Ok(app)
}

fn read_event(source: &str) -> Result<Request, Box<dyn std::error::Error>> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    logging::init(&config.observability.log_level);

    tracing::info!(
        path = ?cli.config,
        extended = config.extended,
        ignore_trailing_slash = config.ignore_trailing_slash,
        "Configuration loaded"
    );

    let dispatcher = demo_app(config)?.build();
    let event = read_event(&cli.event)?;
    let response = dispatcher.dispatch(event).await;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");
    Ok(())
}
