//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Route handler (id / payload extracted)
//!     → forwarder.rs (validate inputs, pick operation)
//!     → template.rs (resolve concrete URL)
//!     → outbound call (bearer credential, JSON body)
//!     → outcome.rs (Success / UpstreamError / TransportFailure)
//!     → http::response (1:1 translation to the inbound response)
//! ```
//!
//! # Design Decisions
//! - One outbound attempt per inbound request; no retries
//! - Every outbound call is bounded by the configured upstream timeout
//! - Stateless: the forwarder holds only immutable configuration and a
//!   pooled client, so concurrent requests never interact

pub mod forwarder;
pub mod outcome;
pub mod template;

pub use forwarder::Forwarder;
pub use outcome::{ForwardOutcome, Forwarded, Operation};
pub use template::EndpointTemplate;
