//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read keys through ReadEnv, apply defaults)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to the forwarder and the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and never reloaded
//! - Missing required keys are fatal; every missing key is reported at once
//! - Validation separates presence checks (loader) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, log_level, ConfigError, MapEnv, ReadEnv, SystemEnv};
pub use schema::{
    CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig,
};
