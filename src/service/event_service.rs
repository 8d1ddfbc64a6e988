//! Event service: keeps the shared [`EventStore`] in sync with the
//! backend and runs the create / delete / detail flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future;
use serde::Serialize;

use super::registration::is_registered;
use crate::api::ApiClient;
use crate::api::dto::CreateEventRequest;
use crate::domain::{DEFAULT_IMAGE_URL, Event, EventId, EventPrice, EventStore, Participant};
use crate::error::ClientError;
use crate::presentation::people_string;
use crate::session::SessionManager;
use crate::view::ViewScope;

/// Alert for an event creation that never got an answer.
pub const CREATE_FAILED_MESSAGE: &str = "An error occurred while creating the event.";
/// Alert for an event creation the backend refused without a message.
pub const CREATE_REJECTED_MESSAGE: &str = "Failed to create event.";

/// Fields of the event creation form.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Selected category.
    pub category_id: i64,
    /// Display name.
    pub event_name: String,
    /// Start of the time window.
    pub event_start_time: DateTime<Utc>,
    /// End of the time window.
    pub event_end_time: DateTime<Utc>,
    /// Free-text location.
    pub location: String,
    /// Capacity.
    pub number_people: i64,
    /// Free-text description.
    pub description: String,
    /// Cover image URL; [`DEFAULT_IMAGE_URL`] when absent.
    pub image_url: Option<String>,
}

/// Everything the detail view shows for one event.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    /// The event record.
    pub event: Event,
    /// Participants, when the session could list them.
    pub participants: Option<Vec<Participant>>,
    /// Whether the session user is registered, when known.
    pub registered: Option<bool>,
    /// Price, when the backend provides one.
    pub price: Option<EventPrice>,
}

impl EventDetail {
    /// `"filled/capacity"`, when participants are known.
    #[must_use]
    pub fn people(&self) -> Option<String> {
        self.participants
            .as_ref()
            .map(|p| people_string(p.len(), self.event.number_people))
    }
}

/// Orchestration layer for event operations.
///
/// Every mutation follows the same pattern: check the session, call the
/// backend, update the store, log the outcome.
#[derive(Debug, Clone)]
pub struct EventService {
    api: ApiClient,
    store: Arc<EventStore>,
    sessions: SessionManager,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(api: ApiClient, store: Arc<EventStore>, sessions: SessionManager) -> Self {
        Self {
            api,
            store,
            sessions,
        }
    }

    /// Returns the shared store.
    #[must_use]
    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    /// Re-fetches the full event list and replaces the cache.
    ///
    /// On failure the previous cache is left untouched and the error is
    /// only logged; callers cannot tell stale data from fresh. Returns
    /// `true` when the cache was replaced.
    pub async fn fetch_events(&self) -> bool {
        match self.api.list_events().await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "events fetched");
                self.store.replace_events(events);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = e.kind(), "failed to fetch events");
                false
            }
        }
    }

    /// Same as [`EventService::fetch_events`], bound to `scope`.
    ///
    /// A response that arrives after the scope is cancelled is dropped
    /// instead of being applied.
    pub async fn fetch_events_in(&self, scope: &ViewScope) -> bool {
        let outcome = match scope.run(self.api.list_events()).await {
            Ok(events) => scope.commit(|| self.store.replace_events(events)),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => true,
            Err(ClientError::Cancelled) => {
                tracing::debug!("event fetch cancelled with its view");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = e.kind(), "failed to fetch events");
                false
            }
        }
    }

    /// Prepends a server-confirmed event to the cache.
    pub fn add_event(&self, event: Event) {
        self.store.add_event(event);
    }

    /// Creates an event and prepends the confirmed record to the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] without contacting the server
    /// when no token or username is stored, or the backend's error.
    pub async fn create_event(&self, form: NewEvent) -> Result<Event, ClientError> {
        let (token, username) = self.sessions.require_author()?;

        let request = CreateEventRequest {
            username,
            category_id: form.category_id,
            event_name: form.event_name,
            event_start_time: form.event_start_time,
            event_end_time: form.event_end_time,
            location: form.location,
            number_people: form.number_people,
            description: form.description,
            image_url: form
                .image_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
        };

        let event = self.api.create_event(&request, &token).await?;
        self.add_event(event.clone());

        tracing::info!(event_id = %event.id, name = %event.event_name, "event created");
        Ok(event)
    }

    /// Deletes an event, drops it from the cache and re-fetches.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] when no token is stored, or
    /// the backend's error. The cache is untouched on error.
    pub async fn delete_event(&self, event_id: EventId) -> Result<(), ClientError> {
        let token = self
            .sessions
            .current()?
            .access_token
            .ok_or(ClientError::NotLoggedIn)?;

        self.api.delete_event(event_id, &token).await?;
        let removed = self.store.remove_event(event_id);
        tracing::info!(%event_id, removed, "event deleted");

        let _ = self.fetch_events().await;
        Ok(())
    }

    /// Fetches a single event.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn get_event(&self, event_id: EventId) -> Result<Event, ClientError> {
        self.api.get_event(event_id).await
    }

    /// Fetches the price of an event.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn event_price(&self, event_id: EventId) -> Result<EventPrice, ClientError> {
        self.api.get_event_price(event_id).await
    }

    /// Re-fetches and returns the events created by the session user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] when no username is stored.
    pub async fn history(&self, scope: &ViewScope) -> Result<Vec<Event>, ClientError> {
        let username = self
            .sessions
            .current()?
            .username
            .ok_or(ClientError::NotLoggedIn)?;

        let _ = self.fetch_events_in(scope).await;
        if scope.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        Ok(self.store.events_by_user(&username))
    }

    /// Loads the event, its participants and its price concurrently.
    ///
    /// Participants are only listed when a session exists; price and
    /// participant failures degrade to `None`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the event itself cannot be
    /// fetched, or [`ClientError::Cancelled`].
    pub async fn event_detail(
        &self,
        event_id: EventId,
        scope: &ViewScope,
    ) -> Result<EventDetail, ClientError> {
        let auth = self.sessions.require_auth().ok();

        let participants = async {
            match &auth {
                Some(auth) => self
                    .api
                    .list_participants(event_id, &auth.access_token)
                    .await
                    .map(Some),
                None => Ok(None),
            }
        };

        let (event, participants, price) = scope
            .run(async {
                Ok(future::join3(
                    self.api.get_event(event_id),
                    participants,
                    self.api.get_event_price(event_id),
                )
                .await)
            })
            .await?;

        let event = event?;
        let participants = participants.unwrap_or_else(|e| {
            tracing::warn!(%event_id, error = %e, "failed to list participants");
            None
        });
        let price = price
            .inspect_err(|e| tracing::debug!(%event_id, error = %e, "no price available"))
            .ok();
        let registered = match (&participants, &auth) {
            (Some(rows), Some(auth)) => Some(is_registered(rows, event_id, &auth.user_id)),
            _ => None,
        };

        Ok(EventDetail {
            event,
            participants,
            registered,
            price,
        })
    }
}
