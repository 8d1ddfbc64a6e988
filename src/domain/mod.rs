//! Domain layer: records, identifiers, the shared event store and its
//! change bus.
//!
//! Everything here is backend-agnostic: records decode from the JSON the
//! API returns, and the store only ever receives records that a service
//! already fetched or created.

pub mod event;
pub mod event_bus;
pub mod event_store;
pub mod ids;
pub mod notification;
pub mod participant;
pub mod store_event;

pub use event::{Category, DEFAULT_IMAGE_URL, Event, EventPrice};
pub use event_bus::EventBus;
pub use event_store::EventStore;
pub use ids::{AccountId, EventId};
pub use notification::Notification;
pub use participant::{Account, Participant};
pub use store_event::StoreEvent;
