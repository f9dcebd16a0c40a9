//! Upstream forwarder.
//!
//! # Responsibilities
//! - Validate required inputs before any network activity
//! - Resolve the target URL for each operation
//! - Attach the bearer credential and JSON body
//! - Map the outbound result to a `ForwardOutcome`

use axum::http::StatusCode;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::observability::metrics;
use crate::upstream::outcome::{parse_body, status_text, ForwardOutcome, Forwarded, Operation};
use crate::upstream::template::EndpointTemplate;

pub const PAYMENT_ID_REQUIRED: &str = "Payment ID is required";
pub const PAYMENT_DATA_REQUIRED: &str = "Payment data is required";
pub const PAYMENT_DELETED: &str = "Payment deleted successfully";

/// Forwards logical operations to the single upstream API.
#[derive(Clone)]
pub struct Forwarder {
    client: Client,
    api_url: String,
    payments: EndpointTemplate,
    token: String,
}

impl Forwarder {
    /// Create a forwarder with a pooled client bounded by the configured timeouts.
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeouts.upstream())
            .connect_timeout(config.timeouts.connect())
            .build()?;

        Ok(Self {
            client,
            api_url: config.upstream.api_url.clone(),
            payments: EndpointTemplate::new(config.upstream.payment_template.clone()),
            token: config.upstream.token.clone(),
        })
    }

    /// URL called by `fetch_collection` and `test_connection`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn fetch_collection(&self) -> Forwarded {
        self.send(Operation::FetchCollection, self.api_url.clone(), None)
            .await
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<Forwarded, GatewayError> {
        let id = require_id(id)?;
        Ok(self
            .send(Operation::FetchById, self.payments.resolve(id), None)
            .await)
    }

    /// Create a payment. Answers 201 on upstream success.
    pub async fn create(&self, payload: Option<Value>) -> Result<Forwarded, GatewayError> {
        let payload = require_payload(payload)?;
        let mut forwarded = self
            .send(Operation::Create, self.payments.collection(), Some(&payload))
            .await;
        if let ForwardOutcome::Success { status, .. } = &mut forwarded.outcome {
            *status = StatusCode::CREATED;
        }
        Ok(forwarded)
    }

    pub async fn update_by_id(
        &self,
        id: &str,
        payload: Option<Value>,
    ) -> Result<Forwarded, GatewayError> {
        let id = require_id(id)?;
        let payload = require_payload(payload)?;
        Ok(self
            .send(Operation::UpdateById, self.payments.resolve(id), Some(&payload))
            .await)
    }

    /// Delete a payment. The upstream body is replaced by an acknowledgement.
    pub async fn delete_by_id(&self, id: &str) -> Result<Forwarded, GatewayError> {
        let id = require_id(id)?;
        let mut forwarded = self
            .send(Operation::DeleteById, self.payments.resolve(id), None)
            .await;
        if let ForwardOutcome::Success { status, body } = &mut forwarded.outcome {
            *status = StatusCode::OK;
            *body = json!({ "message": PAYMENT_DELETED, "id": id });
        }
        Ok(forwarded)
    }

    pub async fn test_connection(&self) -> Forwarded {
        self.send(Operation::TestConnection, self.api_url.clone(), None)
            .await
    }

    /// Perform one outbound call. Never retries.
    async fn send(&self, operation: Operation, url: String, payload: Option<&Value>) -> Forwarded {
        let start = Instant::now();
        let method = operation.method();

        tracing::debug!(
            operation = operation.name(),
            method = %method,
            url = %url,
            "Forwarding to upstream"
        );

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json");
        if let Some(payload) = payload {
            // Also sets `Content-Type: application/json`.
            request = request.json(payload);
        }

        let outcome = match request.send().await {
            Ok(response) => read_response(operation, response).await,
            Err(e) => {
                let message = describe_transport_error(&e);
                tracing::error!(
                    operation = operation.name(),
                    url = %url,
                    error = %message,
                    "Upstream unreachable"
                );
                ForwardOutcome::TransportFailure { message }
            }
        };

        if let ForwardOutcome::UpstreamError { status, .. } = &outcome {
            tracing::warn!(
                operation = operation.name(),
                url = %url,
                status = %status,
                "Upstream returned error status"
            );
        }

        metrics::record_forward(operation.name(), &outcome, start);

        Forwarded {
            operation,
            url,
            outcome,
        }
    }
}

async fn read_response(operation: Operation, response: reqwest::Response) -> ForwardOutcome {
    let status = response.status();

    if !status.is_success() {
        let details = if operation.captures_error_body() {
            response.text().await.ok()
        } else {
            None
        };
        return ForwardOutcome::UpstreamError {
            status,
            status_text: status_text(status),
            details,
        };
    }

    match response.bytes().await {
        Ok(bytes) => ForwardOutcome::Success {
            status,
            body: parse_body(&bytes),
        },
        Err(e) => ForwardOutcome::TransportFailure {
            message: describe_transport_error(&e),
        },
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Upstream request timed out: {}", e)
    } else if e.is_connect() {
        format!("Could not connect to upstream: {}", e)
    } else {
        e.to_string()
    }
}

fn require_id(id: &str) -> Result<&str, GatewayError> {
    if id.trim().is_empty() {
        return Err(GatewayError::Validation(PAYMENT_ID_REQUIRED.to_string()));
    }
    Ok(id)
}

/// `None`, `null` and `{}` all count as a missing payload.
fn require_payload(payload: Option<Value>) -> Result<Value, GatewayError> {
    match payload {
        None | Some(Value::Null) => {
            Err(GatewayError::Validation(PAYMENT_DATA_REQUIRED.to_string()))
        }
        Some(Value::Object(map)) if map.is_empty() => {
            Err(GatewayError::Validation(PAYMENT_DATA_REQUIRED.to_string()))
        }
        Some(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    // Port 9 (discard) on localhost: any call that slips past validation fails fast.
    fn forwarder() -> Forwarder {
        let config = GatewayConfig::new(UpstreamConfig {
            api_url: "http://127.0.0.1:9/data".into(),
            payment_template: "http://127.0.0.1:9/payments/{id}".into(),
            token: "tok".into(),
        });
        Forwarder::new(&config).unwrap()
    }

    fn assert_validation(result: Result<Forwarded, GatewayError>, expected: &str) {
        match result {
            Err(GatewayError::Validation(msg)) => assert_eq!(msg, expected),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(f) => panic!("expected validation error, got {:?}", f.outcome),
        }
    }

    #[tokio::test]
    async fn test_missing_id_rejected() {
        let f = forwarder();
        assert_validation(f.fetch_by_id("").await, PAYMENT_ID_REQUIRED);
        assert_validation(f.delete_by_id("  ").await, PAYMENT_ID_REQUIRED);
        assert_validation(
            f.update_by_id("", Some(json!({"amount": 1}))).await,
            PAYMENT_ID_REQUIRED,
        );
    }

    #[tokio::test]
    async fn test_missing_payload_rejected() {
        let f = forwarder();
        assert_validation(f.create(None).await, PAYMENT_DATA_REQUIRED);
        assert_validation(f.create(Some(Value::Null)).await, PAYMENT_DATA_REQUIRED);
        assert_validation(f.create(Some(json!({}))).await, PAYMENT_DATA_REQUIRED);
        assert_validation(f.update_by_id("1", None).await, PAYMENT_DATA_REQUIRED);
    }

    #[test]
    fn test_require_payload_accepts_non_object_json() {
        assert_eq!(require_payload(Some(json!([1, 2]))).unwrap(), json!([1, 2]));
        assert_eq!(require_payload(Some(json!({"a": 1}))).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_api_url_exposed() {
        assert_eq!(forwarder().api_url(), "http://127.0.0.1:9/data");
    }
}
