//! Forwarding outcomes and the operations that produce them.

use axum::http::{Method, StatusCode};
use serde_json::Value;

/// Logical operation forwarded to the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchCollection,
    FetchById,
    Create,
    UpdateById,
    DeleteById,
    TestConnection,
}

impl Operation {
    pub fn method(self) -> Method {
        match self {
            Operation::FetchCollection | Operation::FetchById | Operation::TestConnection => {
                Method::GET
            }
            Operation::Create => Method::POST,
            Operation::UpdateById => Method::PUT,
            Operation::DeleteById => Method::DELETE,
        }
    }

    /// Stable name for logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            Operation::FetchCollection => "fetch_collection",
            Operation::FetchById => "fetch_by_id",
            Operation::Create => "create",
            Operation::UpdateById => "update_by_id",
            Operation::DeleteById => "delete_by_id",
            Operation::TestConnection => "test_connection",
        }
    }

    /// Message reported to the caller when the operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::FetchCollection => "Failed to fetch data from API",
            Operation::FetchById => "Failed to fetch payment",
            Operation::Create => "Failed to create payment",
            Operation::UpdateById => "Failed to update payment",
            Operation::DeleteById => "Failed to delete payment",
            Operation::TestConnection => "Failed to connect to API",
        }
    }

    /// Write operations keep the upstream error body as `details`;
    /// reads only report status and status text.
    pub fn captures_error_body(self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::UpdateById | Operation::DeleteById
        )
    }
}

/// Result of exactly one outbound call attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    /// Upstream answered 2xx.
    Success { status: StatusCode, body: Value },

    /// Upstream answered with a non-success status.
    UpstreamError {
        status: StatusCode,
        status_text: String,
        details: Option<String>,
    },

    /// The upstream could not be reached (DNS, refused, timeout).
    TransportFailure { message: String },
}

impl ForwardOutcome {
    /// Label used in metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardOutcome::Success { .. } => "success",
            ForwardOutcome::UpstreamError { .. } => "upstream_error",
            ForwardOutcome::TransportFailure { .. } => "transport_failure",
        }
    }

    /// Upstream status, when the upstream answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ForwardOutcome::Success { status, .. } | ForwardOutcome::UpstreamError { status, .. } => {
                Some(*status)
            }
            ForwardOutcome::TransportFailure { .. } => None,
        }
    }
}

/// An outcome together with the call that produced it.
#[derive(Debug, Clone)]
pub struct Forwarded {
    pub operation: Operation,
    pub url: String,
    pub outcome: ForwardOutcome,
}

/// Parse a success body: empty → `null`, non-JSON text → JSON string.
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Reason phrase for a status, empty for unregistered codes.
pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}
