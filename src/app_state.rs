//! Composition root shared by every view.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::domain::{EventBus, EventId, EventStore};
use crate::error::ClientError;
use crate::service::{AccountService, CategoryService, EventService, RegistrationFlow};
use crate::session::{FileSecureStore, SecureStore, SessionManager};

/// Shared application state handed to each view.
///
/// Owns the single [`EventStore`]; services receive it by `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// HTTP client bound to the configured backend.
    pub api: ApiClient,
    /// Session triple in the secure store.
    pub sessions: SessionManager,
    /// Event cache and notification log.
    pub store: Arc<EventStore>,
    /// Event operations.
    pub events: Arc<EventService>,
    /// Login, sign-up and profile.
    pub accounts: Arc<AccountService>,
    /// Category operations.
    pub categories: Arc<CategoryService>,
}

impl AppState {
    /// Builds the state from configuration, backed by the session file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let secure_store: Arc<dyn SecureStore> =
            Arc::new(FileSecureStore::new(config.session_file.clone()));
        Self::with_store(config, secure_store)
    }

    /// Builds the state over an explicit secure store.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn with_store(
        config: &ClientConfig,
        secure_store: Arc<dyn SecureStore>,
    ) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config.api_url, config.request_timeout)?;
        let sessions = SessionManager::new(secure_store);
        let store = Arc::new(EventStore::new(EventBus::new(config.event_bus_capacity)));

        let events = Arc::new(EventService::new(
            api.clone(),
            Arc::clone(&store),
            sessions.clone(),
        ));
        let accounts = Arc::new(AccountService::new(api.clone(), sessions.clone()));
        let categories = Arc::new(CategoryService::new(api.clone(), sessions.clone()));

        tracing::debug!(api_url = %config.api_url, "application state built");
        Ok(Self {
            api,
            sessions,
            store,
            events,
            accounts,
            categories,
        })
    }

    /// Opens a registration flow for one event.
    #[must_use]
    pub fn registration(&self, event_id: EventId) -> RegistrationFlow {
        RegistrationFlow::new(self.api.clone(), self.sessions.clone(), event_id)
    }
}
