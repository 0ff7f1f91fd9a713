//! HTTP API for the short-link service (axum).
//!
//! Routes: `/` (index page), `/static/*` (assets), `/encode`, `/decode`,
//! `/determine`, and a catch-all that follows short links.

mod error;
mod routes;

pub use error::ApiError;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::shortener::Shortener;

/// Built-in page used when `static_dir` has no `index.html`: a single field
/// whose Enter submits to `/determine`.
pub(crate) const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>snip</title>
</head>
<body>
<form action="/determine" method="get">
<input id="field" name="query" type="text" autofocus placeholder="Paste a URL or some text">
</form>
</body>
</html>
"#;

pub struct ServerState {
    pub shortener: Shortener,
    pub static_dir: Option<PathBuf>,
}

pub type SharedState = Arc<ServerState>;

pub fn build_router(state: SharedState) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::index))
        .route("/encode", get(routes::encode))
        .route("/decode", get(routes::decode))
        .route("/determine", get(routes::determine))
        .route("/{*path}", get(routes::follow));

    if let Some(dir) = &state.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    state: SharedState,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;
    tracing::info!("HTTP server exited");
    Ok(())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: SharedState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(
        %addr,
        domain = %state.shortener.domain_name(),
        static_dir = ?state.static_dir,
        "HTTP listener bound"
    );
    serve_with_listener(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("ctrl-c handler: {}", e);
    }
}
