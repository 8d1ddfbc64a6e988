//! Fan-out of [`StoreEvent`]s from the [`super::EventStore`] to views.
//!
//! The store publishes after it has released its locks, so a receiver
//! that reads the store on wake-up sees the mutation it was told about.
//! Views that fall more than `capacity` changes behind get
//! [`broadcast::error::RecvError::Lagged`] and should re-read the whole
//! list rather than replay changes.

use tokio::sync::broadcast;

use super::StoreEvent;

/// Change feed of one [`super::EventStore`].
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Creates a feed that buffers up to `capacity` changes per view.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Announces `change` to every subscribed view.
    ///
    /// A store with no open views drops the change.
    pub fn publish(&self, change: StoreEvent) {
        let event_type = change.event_type_str();
        match self.sender.send(change) {
            Ok(receivers) => tracing::trace!(event_type, receivers, "store change published"),
            Err(_) => tracing::trace!(event_type, "store change dropped, no subscribers"),
        }
    }

    /// Subscribes a view to changes made from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::EventStore;
    use crate::domain::event::tests::sample_event;

    fn replaced(count: usize) -> StoreEvent {
        StoreEvent::EventsReplaced {
            count,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn store_mutations_without_views_are_dropped() {
        let store = EventStore::new(EventBus::new(4));
        store.replace_events(vec![sample_event(1, "Morning Run", "sari")]);
        let mut rx = store.event_bus().subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn add_event_announces_event_before_notification() {
        let store = EventStore::new(EventBus::new(8));
        let mut rx = store.event_bus().subscribe();
        store.add_event(sample_event(3, "Friday Futsal", "sari"));

        let Ok(first) = rx.try_recv() else {
            panic!("expected event_added");
        };
        let Ok(second) = rx.try_recv() else {
            panic!("expected notification_added");
        };
        assert_eq!(first.event_type_str(), "event_added");
        assert_eq!(second.event_type_str(), "notification_added");
        assert_eq!(first.event_id(), second.event_id());
        assert!(first.timestamp() <= second.timestamp());
    }

    #[test]
    fn lagging_view_skips_to_latest_changes() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        for count in 1..=5 {
            bus.publish(replaced(count));
        }

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(3))
        ));
        let Ok(StoreEvent::EventsReplaced { count, .. }) = rx.try_recv() else {
            panic!("expected a replacement");
        };
        assert_eq!(count, 4);
        let Ok(StoreEvent::EventsReplaced { count, .. }) = rx.try_recv() else {
            panic!("expected a replacement");
        };
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn every_view_sees_each_change() {
        let bus = EventBus::new(0);
        let mut list_view = bus.subscribe();
        let mut watch_view = bus.subscribe();
        bus.publish(replaced(2));

        let Ok(a) = list_view.recv().await else {
            panic!("list view missed the change");
        };
        let Ok(b) = watch_view.recv().await else {
            panic!("watch view missed the change");
        };
        assert_eq!(a.event_type_str(), b.event_type_str());
    }
}
