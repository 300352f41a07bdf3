//! Webhook HTTP server.
//!
//! Telegram POSTs updates to `/{token}`; the path segment must match the bot
//! token. `/` and `/health` answer liveness probes from the hosting platform.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use secrecy::{ExposeSecret, SecretString};
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::types::Update;
use tokio::net::TcpListener;

use crate::telegram::handlers::{dispatch_update, HandlerDeps};

/// Body returned to Telegram for every accepted update
pub const WEBHOOK_ACK: &str = "ok";

/// Body returned by the liveness endpoint
pub const ALIVE_TEXT: &str = "Bot is alive!";

/// Shared state for the web server.
#[derive(Clone)]
struct WebState {
    deps: HandlerDeps,
    token: Arc<SecretString>,
}

/// Builds the router serving the webhook and liveness endpoints.
pub fn create_router(deps: HandlerDeps, token: SecretString) -> Router {
    let state = WebState {
        deps,
        token: Arc::new(token),
    };

    Router::new()
        .route("/", get(alive_handler))
        .route("/health", get(health_handler))
        .route("/{token}", post(webhook_handler))
        .with_state(state)
}

/// Start the webhook server and serve until `shutdown` resolves.
pub async fn start_web_server<F>(port: u16, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    log::info!("Starting web server on http://{}", addr);
    log::info!("  POST /<token> - Telegram webhook");
    log::info!("  GET  /        - Liveness");
    log::info!("  GET  /health  - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown).await
}

/// POST /{token}: decodes a Telegram update and dispatches it.
async fn webhook_handler(
    Path(token): Path<String>,
    State(state): State<WebState>,
    body: Bytes,
) -> impl IntoResponse {
    if token != state.token.expose_secret() {
        log::warn!("Rejected webhook call on unknown path");
        return (StatusCode::NOT_FOUND, "Not found");
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            log::warn!("Failed to decode webhook payload: {}", e);
            return (StatusCode::BAD_REQUEST, "Bad request");
        }
    };

    dispatch_update(&state.deps, &update).await;
    (StatusCode::OK, WEBHOOK_ACK)
}

/// GET /: liveness check.
async fn alive_handler() -> impl IntoResponse {
    (StatusCode::OK, ALIVE_TEXT)
}

/// GET /health: simple health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
