//! # matchday
//!
//! Client core for the matchday "find a team" sports events backend.
//!
//! The backend owns every record; this crate decodes its JSON envelopes
//! once at the boundary, keeps the signed-in session in a secure local
//! store, and holds the small amount of shared client state the views
//! need: an in-memory event cache, a local notification log and the
//! participant-registration state machine.
//!
//! ## Architecture
//!
//! ```text
//! Views (cli/)
//!     │
//!     ├── ViewScope (view/)          cooperative cancellation
//!     │
//!     ├── EventService, AccountService,
//!     │   CategoryService, RegistrationFlow (service/)
//!     │
//!     ├── EventStore + EventBus (domain/)
//!     ├── SessionManager (session/)
//!     │
//!     └── ApiClient (api/) ── REST backend
//! ```

pub mod api;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod presentation;
pub mod service;
pub mod session;
pub mod view;
