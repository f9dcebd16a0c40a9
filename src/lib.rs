//! Payment API Gateway Library
//!
//! A thin reverse proxy in front of a single upstream payment API. Every
//! route builds an upstream URL, attaches the bearer credential, forwards
//! the call once and relays the normalized outcome.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{ForwardOutcome, Forwarder};
