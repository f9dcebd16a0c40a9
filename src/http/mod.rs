//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → handlers.rs (extract id / payload)
//!     → upstream::Forwarder (outbound call)
//!     → response.rs (outcome → JSON response)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
