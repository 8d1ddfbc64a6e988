//! Service layer: business logic orchestration.
//!
//! Each service owns a cloned [`crate::api::ApiClient`] and
//! [`crate::session::SessionManager`]; [`EventService`] also holds the
//! shared [`crate::domain::EventStore`]. Session preconditions are
//! checked here, before any request is sent.

pub mod account_service;
pub mod category_service;
pub mod event_service;
pub mod registration;

pub use account_service::{AccountService, SignUpForm};
pub use category_service::CategoryService;
pub use event_service::{EventDetail, EventService, NewEvent};
pub use registration::{RegistrationFlow, RegistrationState, is_registered};
