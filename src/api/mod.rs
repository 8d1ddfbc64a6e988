//! REST API layer: envelope decoding, the HTTP client and one typed
//! method per backend endpoint.
//!
//! All paths are relative to the configured base URL, which already
//! includes the `/api/v1` prefix.

pub mod accounts;
pub mod client;
pub mod dto;
pub mod envelope;
pub mod events;

pub use client::ApiClient;
pub use envelope::{ApiMessage, ApiOutcome};
