//! Client-local notification records.

use serde::Serialize;

use super::{Event, EventId};

/// One entry of the local activity feed.
///
/// Never persisted and never fetched from the backend; the id is
/// borrowed from the event that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Id of the triggering event.
    pub id: EventId,
    /// Rendered message.
    pub message: String,
}

impl Notification {
    /// Builds the "event created" notification for `event`.
    #[must_use]
    pub fn event_created(event: &Event) -> Self {
        Self {
            id: event.id,
            message: format!("New event \"{}\" has been created", event.event_name),
        }
    }
}
