//! HTTP server exposing the status engine
//!
//! One logical resource, one response: every request path and method answers
//! identically from the engine's current state.

use crate::status::StatusEngine;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Answer any request from the engine's current state.
async fn status(State(engine): State<Arc<StatusEngine>>, headers: HeaderMap) -> Response {
    engine.respond(&headers)
}

/// Build the router: a single catch-all handler, no per-path routes.
fn build_router(engine: Arc<StatusEngine>) -> Router {
    Router::new().fallback(status).with_state(engine)
}

/// Run the status server on the specified port until `shutdown` fires.
///
/// Requests are answered from state published by the engine's polling task;
/// the server holds no state of its own. Returns once in-flight connections
/// have drained after shutdown.
pub async fn run_status_server(
    port: u16,
    engine: Arc<StatusEngine>,
    shutdown: CancellationToken,
) -> Result<(), std::io::Error> {
    let app = build_router(engine);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    // Log after successful bind - server is actually listening
    info!(port = %port, "Status server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}
