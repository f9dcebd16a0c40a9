//! Configuration validation.
//!
//! # Responsibilities
//! - Check that upstream endpoints are absolute http(s) URLs
//! - Check that the payment template resolves to a valid URL
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Keep the inbound request timeout above the outbound upstream timeout
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::upstream::template::EndpointTemplate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{key} is not a valid URL ({reason}): {value}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{key} must use http or https, got {scheme}")]
    UnsupportedScheme { key: &'static str, scheme: String },

    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },

    #[error(
        "REQUEST_TIMEOUT_SECS ({request_secs}) must exceed UPSTREAM_TIMEOUT_SECS ({upstream_secs})"
    )]
    TimeoutOrder { request_secs: u64, upstream_secs: u64 },
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("API_URL", &config.upstream.api_url, &mut errors);

    // Resolve with a sample id so the placeholder itself does not fail parsing.
    let template = EndpointTemplate::new(config.upstream.payment_template.clone());
    check_url("API_PAYMENT", &template.resolve("0"), &mut errors);

    let positive = [
        ("UPSTREAM_TIMEOUT_SECS", config.timeouts.upstream_secs),
        ("UPSTREAM_CONNECT_TIMEOUT_SECS", config.timeouts.connect_secs),
        ("REQUEST_TIMEOUT_SECS", config.timeouts.request_secs),
        ("MAX_BODY_BYTES", config.listener.max_body_bytes as u64),
    ];
    for (key, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero { key });
        }
    }

    // Outbound calls must finish before the inbound request times out.
    let request_secs = config.timeouts.request_secs;
    let upstream_secs = config.timeouts.upstream_secs;
    if upstream_secs > 0 && request_secs > 0 && request_secs <= upstream_secs {
        errors.push(ValidationError::TimeoutOrder {
            request_secs,
            upstream_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(key: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::UnsupportedScheme {
            key,
            scheme: url.scheme().to_string(),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::UpstreamConfig;

    fn config(api_url: &str, payment: &str) -> GatewayConfig {
        GatewayConfig::new(UpstreamConfig {
            api_url: api_url.into(),
            payment_template: payment.into(),
            token: "tok".into(),
        })
    }

    #[test]
    fn test_valid_config() {
        let c = config(
            "https://api.example.com/data",
            "https://api.example.com/payments/{id}",
        );
        assert!(validate_config(&c).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut c = config("ftp://files.example.com", "payments/{id}");
        c.timeouts.upstream_secs = 0;
        let errors = validate_config(&c).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::UnsupportedScheme {
            key: "API_URL",
            scheme: "ftp".into()
        }));
        assert!(errors.contains(&ValidationError::Zero {
            key: "UPSTREAM_TIMEOUT_SECS"
        }));
    }

    #[test]
    fn test_request_timeout_must_exceed_upstream_timeout() {
        let mut c = config(
            "https://api.example.com/data",
            "https://api.example.com/payments/{id}",
        );
        c.timeouts.upstream_secs = 30;
        c.timeouts.request_secs = 30;
        assert_eq!(
            validate_config(&c).unwrap_err(),
            vec![ValidationError::TimeoutOrder {
                request_secs: 30,
                upstream_secs: 30
            }]
        );

        c.timeouts.request_secs = 31;
        assert!(validate_config(&c).is_ok());
    }
}
