//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer + forwarder produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape), when configured
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every inbound span
//! - The bearer token never appears in logs or metric labels

pub mod logging;
pub mod metrics;
