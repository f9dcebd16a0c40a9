//! Configuration loading from the process environment.

use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

use crate::config::schema::{
    CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig,
};
use crate::config::validation::{validate_config, ValidationError};
use crate::upstream::template::EndpointTemplate;

pub const API_URL: &str = "API_URL";
pub const API_PAYMENT: &str = "API_PAYMENT";
/// Historical misspelling of `API_PAYMENT`, still honored as a fallback.
pub const API_PAYMENT_LEGACY: &str = "API_PAYMENET";
pub const API_TOKEN: &str = "API_TOKEN";
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
pub const UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
pub const UPSTREAM_CONNECT_TIMEOUT_SECS: &str = "UPSTREAM_CONNECT_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";
pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
pub const APP_ENV: &str = "APP_ENV";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const METRICS_ADDRESS: &str = "METRICS_ADDRESS";

/// Source of configuration variables.
pub trait ReadEnv {
    /// Returns the value of `key`, or `None` when it is unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment, used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl ReadEnv for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {key}: {value:?}")]
    Parse { key: &'static str, value: String },

    #[error(
        "validation failed: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from the given environment.
pub fn load_from_env<E: ReadEnv>(env: &E) -> Result<GatewayConfig, ConfigError> {
    let mut missing = Vec::new();
    let api_url = required(env, &[API_URL], &mut missing);
    let payment_template = required(env, &[API_PAYMENT, API_PAYMENT_LEGACY], &mut missing);
    let token = required(env, &[API_TOKEN], &mut missing);

    let (api_url, payment_template, token) = match (api_url, payment_template, token) {
        (Some(a), Some(p), Some(t)) => (a, p, t),
        _ => return Err(ConfigError::Missing(missing)),
    };

    if !EndpointTemplate::new(payment_template.clone()).has_placeholder() {
        tracing::warn!(
            template = %payment_template,
            "Payment endpoint has no {{id}} placeholder; id operations will use it verbatim"
        );
    }

    let defaults = GatewayConfig::new(UpstreamConfig {
        api_url: String::new(),
        payment_template: String::new(),
        token: String::new(),
    });

    let config = GatewayConfig {
        listener: ListenerConfig {
            host: optional(env, HOST).unwrap_or(defaults.listener.host),
            port: parse_or(env, PORT, defaults.listener.port)?,
            max_body_bytes: parse_or(env, MAX_BODY_BYTES, defaults.listener.max_body_bytes)?,
        },
        upstream: UpstreamConfig {
            api_url,
            payment_template,
            token,
        },
        timeouts: TimeoutConfig {
            upstream_secs: parse_or(env, UPSTREAM_TIMEOUT_SECS, defaults.timeouts.upstream_secs)?,
            connect_secs: parse_or(
                env,
                UPSTREAM_CONNECT_TIMEOUT_SECS,
                defaults.timeouts.connect_secs,
            )?,
            request_secs: parse_or(env, REQUEST_TIMEOUT_SECS, defaults.timeouts.request_secs)?,
        },
        cors: CorsConfig {
            allowed_origins: optional(env, CORS_ORIGINS)
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        },
        observability: ObservabilityConfig {
            log_level: log_level(env),
            metrics_address: optional(env, METRICS_ADDRESS),
        },
        environment: optional(env, APP_ENV).unwrap_or(defaults.environment),
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// `LOG_LEVEL`, or the default level when unset.
///
/// Exposed separately so logging can be initialized before the rest of the
/// configuration is loaded; `load_from_env` stores the same value.
pub fn log_level<E: ReadEnv>(env: &E) -> String {
    optional(env, LOG_LEVEL).unwrap_or_else(|| ObservabilityConfig::default().log_level)
}

/// First non-blank value among `keys`; records the primary key as missing otherwise.
fn required<E: ReadEnv>(
    env: &E,
    keys: &[&'static str],
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    for (i, key) in keys.iter().enumerate() {
        if let Some(value) = optional(env, key) {
            if i > 0 {
                tracing::warn!(key = %key, preferred = %keys[0], "Using fallback configuration key");
            }
            return Some(value);
        }
    }
    missing.push(keys[0]);
    None
}

fn optional<E: ReadEnv>(env: &E, key: &str) -> Option<String> {
    env.var(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<E: ReadEnv, T: FromStr>(
    env: &E,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match optional(env, key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Parse { key, value: raw }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
