//! Liveness reporting.
//!
//! `/health` answers from local state only; it never contacts the upstream.
//! Upstream reachability is checked by `/api/test-connection` instead.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::response::timestamp;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub environment: String,
}

impl HealthReport {
    pub fn ok(environment: impl Into<String>) -> Self {
        Self {
            status: "OK",
            timestamp: timestamp(),
            environment: environment.into(),
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::ok(state.config.environment.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_shape() {
        let json = serde_json::to_value(HealthReport::ok("staging")).unwrap();
        assert_eq!(json["status"], "OK");
        assert_eq!(json["environment"], "staging");
        assert!(json["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
    }
}
