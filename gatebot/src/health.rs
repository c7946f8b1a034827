//! Liveness endpoint for hosting platforms that require an open port.
//!
//! Runs on a separate tokio task and serves `GET /` with a fixed body. Shares nothing with the bot.

use axum::{http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Body returned by `GET /`.
pub const HEALTH_BODY: &str = "Bot is alive and polling.";

async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, HEALTH_BODY)
}

/// Router with the single liveness route.
pub fn router() -> Router {
    Router::new().route("/", get(root))
}

/// Serves the liveness router on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    axum::serve(listener, router()).await
}

/// Run the liveness HTTP server.
///
/// Binds to `0.0.0.0:port`. A bind or serve failure is logged and the task ends; the bot keeps running.
/// This is a long-running task that should be spawned in the background.
pub async fn run_health_server(port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind health check server on {}: {}", addr, e);
            return;
        }
    };
    tracing::info!("Health check server listening on {}", addr);

    if let Err(e) = serve(listener).await {
        tracing::error!("Health check server error: {}", e);
    }
}
