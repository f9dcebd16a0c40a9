//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! Every section has defaults except the upstream, which must come from the
//! environment.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::observability::logging::DEFAULT_LOG_LEVEL;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayConfig {
    /// Listener configuration (host, port, body limit).
    pub listener: ListenerConfig,

    /// Upstream API endpoints and credential.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Cross-origin settings for browser callers.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Deployment environment name reported by `/health`.
    pub environment: String,
}

impl GatewayConfig {
    /// Build a config around the given upstream, defaulting everything else.
    pub fn new(upstream: UpstreamConfig) -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream,
            timeouts: TimeoutConfig::default(),
            cors: CorsConfig::default(),
            observability: ObservabilityConfig::default(),
            environment: "development".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// The single upstream API this gateway fronts.
#[derive(Clone, Serialize)]
pub struct UpstreamConfig {
    /// Primary read endpoint, used verbatim.
    pub api_url: String,

    /// Payment endpoint template containing the `{id}` placeholder.
    pub payment_template: String,

    /// Bearer credential attached to every outbound call.
    #[serde(skip_serializing)]
    pub token: String,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("payment_template", &self.payment_template)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Timeout configuration for inbound and outbound traffic.
#[derive(Debug, Clone, Serialize)]
pub struct TimeoutConfig {
    /// Total time allowed for one outbound call, in seconds.
    pub upstream_secs: u64,

    /// Outbound connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for one inbound request, in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn upstream(&self) -> Duration {
        Duration::from_secs(self.upstream_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: 10,
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorsConfig {
    /// Allowed origins. Empty, or containing `*`, allows any origin.
    pub allowed_origins: Vec<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus exporter bind address; metrics are not exported when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream() -> UpstreamConfig {
        UpstreamConfig {
            api_url: "https://api.example.com/data".into(),
            payment_template: "https://api.example.com/payments/{id}".into(),
            token: "s3cret".into(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::new(upstream());
        assert_eq!(config.listener.port, 5000);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.timeouts.upstream(), Duration::from_secs(10));
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_token_never_rendered() {
        let config = GatewayConfig::new(upstream());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("payments/{id}"));
    }
}
