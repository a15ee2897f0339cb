//! HTTP transport for microsvc: maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command`: dispatch a command. Body = JSON input; an empty body
//!   is treated as `{}`.
//! - `GET /health`: health check returning `{ "ok": true, "commands": [...] }`.
//!
//! Errors are returned as `{ "error": "<message>" }` with the status from
//! [`HandlerError::status_code`].

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::error::HandlerError;
use super::service::Service;

/// Build an axum `Router` that dispatches commands via the given service.
///
/// CORS is open to every origin.
pub fn router<R: Send + Sync + 'static>(service: Arc<Service<R>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", post(command_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`)
/// until `shutdown` resolves.
pub async fn serve<R, F>(service: Arc<Service<R>>, addr: &str, shutdown: F) -> Result<(), std::io::Error>
where
    R: Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

/// `GET /health`: returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
) -> impl IntoResponse {
    let mut commands: Vec<&str> = service.commands();
    commands.sort_unstable();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `POST /:command`: dispatch a command with the JSON body as input.
async fn command_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    Path(command): Path<String>,
    body: Bytes,
) -> Response {
    let input = match parse_body(&body) {
        Ok(input) => input,
        Err(e) => return error_response(&command, e),
    };
    match service.dispatch(&command, input).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(&command, e),
    }
}

fn parse_body(body: &[u8]) -> Result<Value, HandlerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    Ok(serde_json::from_slice(body)?)
}

fn error_response(command: &str, e: HandlerError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(command, error = ?e, "command failed");
    }
    let body = json!({ "error": e.to_string() });
    (status, Json(body)).into_response()
}
