//! Response handling and transformation.
//!
//! # Responsibilities
//! - Translate each `ForwardOutcome` 1:1 into the inbound response
//! - Reuse the upstream status code for upstream errors
//! - Map transport failures and panics to 500
//!
//! # Design Decisions
//! - Bodies are always JSON
//! - Plain reads report only status/statusText on failure; writes also
//!   carry the upstream error body as `details`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::any::Any;

use crate::error::GatewayError;
use crate::upstream::outcome::{status_text, ForwardOutcome, Forwarded, Operation};

/// Current UTC time in RFC 3339 with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl IntoResponse for Forwarded {
    fn into_response(self) -> Response {
        if self.operation == Operation::TestConnection {
            return connection_report(self.url, self.outcome);
        }

        match self.outcome {
            ForwardOutcome::Success { status, body } => (status, Json(body)).into_response(),
            ForwardOutcome::UpstreamError {
                status,
                status_text,
                details,
            } => {
                let mut body = Map::new();
                body.insert("error".into(), json!(self.operation.failure_message()));
                body.insert("status".into(), json!(status.as_u16()));
                body.insert("statusText".into(), json!(status_text));
                if let Some(details) = details {
                    body.insert("details".into(), json!(details));
                }
                (status, Json(Value::Object(body))).into_response()
            }
            ForwardOutcome::TransportFailure { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": self.operation.failure_message(),
                    "message": message,
                })),
            )
                .into_response(),
        }
    }
}

/// Any upstream answer counts as reachable; only transport failures are 500.
fn connection_report(url: String, outcome: ForwardOutcome) -> Response {
    match outcome {
        ForwardOutcome::Success { status, .. } | ForwardOutcome::UpstreamError { status, .. } => (
            StatusCode::OK,
            Json(json!({
                "success": status.is_success(),
                "status": status.as_u16(),
                "statusText": status_text(status),
                "url": url,
                "timestamp": timestamp(),
            })),
        )
            .into_response(),
        ForwardOutcome::TransportFailure { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": message,
                "url": url,
                "timestamp": timestamp(),
            })),
        )
            .into_response(),
    }
}

/// Converts a handler panic into a JSON 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    GatewayError::Internal(message).into_response()
}
