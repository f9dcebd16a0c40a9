//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_upstream_requests_total` (counter): outbound calls by operation, outcome, status
//! - `gateway_upstream_duration_seconds` (histogram): outbound latency by operation
//!
//! Recording is a no-op until a recorder is installed by `init_metrics`.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

use crate::upstream::ForwardOutcome;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one outbound call.
pub fn record_forward(operation: &'static str, outcome: &ForwardOutcome, start: Instant) {
    let status = outcome
        .status()
        .map(|s| s.as_u16().to_string())
        .unwrap_or_else(|| "none".to_string());

    metrics::counter!(
        "gateway_upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome.kind(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "gateway_upstream_duration_seconds",
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}
