//! Route handlers.
//!
//! Handlers only extract path and body parameters and hand them to the
//! forwarder; all validation of required values happens there. Extractor
//! rejections are taken as `Result` so they surface as JSON `GatewayError`s.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::error::GatewayError;
use crate::http::server::AppState;
use crate::upstream::Forwarded;

/// Every route the gateway serves, as reported by the 404 fallback.
pub const AVAILABLE_ENDPOINTS: [&str; 7] = [
    "GET /health",
    "GET /api/show/data",
    "GET /api/show/data/payment/:id",
    "POST /api/payment",
    "PUT /api/payment/:id",
    "DELETE /api/payment/:id",
    "GET /api/test-connection",
];

pub async fn fetch_collection(State(state): State<AppState>) -> Forwarded {
    state.forwarder.fetch_collection().await
}

pub async fn fetch_payment(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Forwarded, GatewayError> {
    let Path(id) = id?;
    state.forwarder.fetch_by_id(&id).await
}

pub async fn create_payment(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Forwarded, GatewayError> {
    let payload = parse_payload(&body?)?;
    state.forwarder.create(payload).await
}

pub async fn update_payment(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Forwarded, GatewayError> {
    let Path(id) = id?;
    let payload = parse_payload(&body?)?;
    state.forwarder.update_by_id(&id, payload).await
}

pub async fn delete_payment(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Forwarded, GatewayError> {
    let Path(id) = id?;
    state.forwarder.delete_by_id(&id).await
}

pub async fn test_connection(State(state): State<AppState>) -> Forwarded {
    state.forwarder.test_connection().await
}

pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::warn!(method = %method, path = %uri.path(), "No route matched");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path(),
            "method": method.as_str(),
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}

/// Empty body → `None`; anything else must be valid JSON.
fn parse_payload(body: &[u8]) -> Result<Option<Value>, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejecting malformed JSON payload");
            GatewayError::Validation("Invalid JSON payload".to_string())
        })
}
