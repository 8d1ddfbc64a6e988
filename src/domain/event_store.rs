//! Shared client-side event cache and notification log.
//!
//! [`EventStore`] is the single source of truth for the event list that
//! every view renders. It is owned by the composition root
//! ([`crate::app_state::AppState`]) and handed out by `Arc`.
//!
//! Both collections are append-only from the client's point of view,
//! except for explicit removal of events by id. There is no
//! reconciliation between an optimistic insert and a later full
//! replacement: callers that want a clean list re-fetch before rendering.

use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use super::{Event, EventBus, EventId, Notification, StoreEvent};

/// In-memory event cache plus local notification log.
///
/// # Concurrency
///
/// Locks are never held across an `.await`, so every operation here is
/// synchronous. Concurrent replacements resolve last-write-wins.
#[derive(Debug)]
pub struct EventStore {
    events: RwLock<Vec<Event>>,
    notifications: RwLock<Vec<Notification>>,
    event_bus: EventBus,
}

impl EventStore {
    /// Creates an empty store publishing changes on `event_bus`.
    #[must_use]
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            notifications: RwLock::new(Vec::new()),
            event_bus,
        }
    }

    /// Returns the bus on which changes are published.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Replaces the entire cached list.
    pub fn replace_events(&self, events: Vec<Event>) {
        let count = events.len();
        *self.events.write().unwrap_or_else(PoisonError::into_inner) = events;

        self.event_bus.publish(StoreEvent::EventsReplaced {
            count,
            timestamp: Utc::now(),
        });
    }

    /// Prepends `event` to the cache and logs a notification for it.
    ///
    /// Does not deduplicate and does not talk to the network: callers
    /// perform the create request and pass the confirmed record.
    pub fn add_event(&self, event: Event) {
        let event_id = event.id;
        let notification = Notification::event_created(&event);

        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, event);
        self.notifications
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, notification.clone());

        let now = Utc::now();
        self.event_bus.publish(StoreEvent::EventAdded {
            event_id,
            timestamp: now,
        });
        self.event_bus.publish(StoreEvent::NotificationAdded {
            notification,
            timestamp: now,
        });
    }

    /// Drops every cached event with the given id.
    ///
    /// Returns the number of records removed. No event is published when
    /// nothing matched.
    pub fn remove_event(&self, event_id: EventId) -> usize {
        let removed = {
            let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
            let before = events.len();
            events.retain(|e| e.id != event_id);
            before - events.len()
        };

        if removed > 0 {
            self.event_bus.publish(StoreEvent::EventRemoved {
                event_id,
                timestamp: Utc::now(),
            });
        }
        removed
    }

    /// Snapshot of the cached events in display order.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of the cached events created by `username`.
    #[must_use]
    pub fn events_by_user(&self, username: &str) -> Vec<Event> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.is_owned_by(username))
            .cloned()
            .collect()
    }

    /// Returns the first cached event with the given id.
    #[must_use]
    pub fn find(&self, event_id: EventId) -> Option<Event> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
    }

    /// Snapshot of the notification log, newest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of cached events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no events are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(EventBus::new(crate::config::DEFAULT_EVENT_BUS_CAPACITY))
    }
}
