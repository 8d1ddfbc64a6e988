//! Data Transfer Objects for request bodies and non-record responses.
//!
//! Records the backend returns verbatim (events, participants, accounts)
//! live in [`crate::domain`]; this module only holds the shapes that
//! exist purely on the wire.

pub mod account_dto;
pub mod event_dto;

pub use account_dto::*;
pub use event_dto::*;
