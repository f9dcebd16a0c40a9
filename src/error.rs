//! Request-scoped errors raised before or outside the forwarder's outbound call.
//!
//! Upstream and transport failures are not errors here: they are
//! `ForwardOutcome` variants and are relayed by `http::response`.

use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required request parameter (id or payload) is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The request body exceeds the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Anything unexpected during request processing.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            GatewayError::Validation(message) | GatewayError::PayloadTooLarge(message) => {
                json!({ "error": message })
            }
            GatewayError::Internal(message) => {
                tracing::error!(error = %message, "Unhandled error while processing request");
                json!({ "error": "Internal server error", "message": message })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejecting undecodable path parameter");
        GatewayError::Validation("Invalid payment ID".to_string())
    }
}

impl From<BytesRejection> for GatewayError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge("Payload too large".to_string())
        } else {
            GatewayError::Validation(format!("Invalid request body: {}", rejection.body_text()))
        }
    }
}
