//! Change notifications emitted by the [`super::EventStore`].
//!
//! Every mutation of the cache or of the notification log publishes a
//! [`StoreEvent`] through the [`super::EventBus`]. Views subscribe to
//! re-render instead of polling shared state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EventId, Notification};

/// Change notification emitted after every store mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The whole event list was replaced by a successful fetch.
    EventsReplaced {
        /// Number of events now cached.
        count: usize,
        /// When the list was replaced.
        timestamp: DateTime<Utc>,
    },

    /// An event was prepended to the cache.
    EventAdded {
        /// Id of the new event.
        event_id: EventId,
        /// When the event was added.
        timestamp: DateTime<Utc>,
    },

    /// Cached events with this id were dropped.
    EventRemoved {
        /// Id of the removed event.
        event_id: EventId,
        /// When the event was removed.
        timestamp: DateTime<Utc>,
    },

    /// A notification was appended to the log.
    NotificationAdded {
        /// The new notification.
        notification: Notification,
        /// When the notification was appended.
        timestamp: DateTime<Utc>,
    },
}

impl StoreEvent {
    /// Returns the event id this change concerns, if any.
    #[must_use]
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Self::EventsReplaced { .. } => None,
            Self::EventAdded { event_id, .. } | Self::EventRemoved { event_id, .. } => {
                Some(*event_id)
            }
            Self::NotificationAdded { notification, .. } => Some(notification.id),
        }
    }

    /// Returns when the change happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::EventsReplaced { timestamp, .. }
            | Self::EventAdded { timestamp, .. }
            | Self::EventRemoved { timestamp, .. }
            | Self::NotificationAdded { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the change type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventsReplaced { .. } => "events_replaced",
            Self::EventAdded { .. } => "event_added",
            Self::EventRemoved { .. } => "event_removed",
            Self::NotificationAdded { .. } => "notification_added",
        }
    }
}
