//! HTTP adapter.
//!
//! Mounts the relay on a single path (any method, so non-POST callbacks reach
//! the relay and get a 405 where appropriate) plus a liveness endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{Method, Request, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::RelayError;
use crate::relay::Relay;

pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

pub const HEALTH_PATH: &str = "/health";

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

/// Prefix `path` with `/` when it has none
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Build the router serving `path`.
///
/// The health check is only mounted when `path` is not `/health` itself.
pub fn router(relay: Arc<Relay>, path: &str, max_body_bytes: usize) -> Router {
    let state = AppState { relay };
    let path = normalize_path(path);

    let mut app = Router::new().route(&path, any(handle_callback));
    if path != HEALTH_PATH {
        app = app.route(HEALTH_PATH, get(health_check));
    }

    app.layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "callback",
                        request_id = %Uuid::new_v4(),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                // Failures are logged once by RelayError
                .on_failure(()),
        )
        .with_state(state)
}

/// Entry point for every SNS callback
async fn handle_callback(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, RelayError> {
    let body = body.map_err(|e| RelayError::UnreadableBody(e.body_text()))?;

    state.relay.handle(&method, &body).await?;
    Ok(StatusCode::OK)
}

/// Health check endpoint (liveness)
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sns-pubsub-relay",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
