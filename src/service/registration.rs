//! Participant registration for a single event.
//!
//! ```text
//! Unknown ──check──▶ Checking ──▶ Registered | NotRegistered
//! NotRegistered ──register──▶ Registering ──▶ (re-check) | Failed
//! ```
//!
//! The state lives in a [`tokio::sync::watch`] channel so a detail view
//! can render it while a command drives it.

use serde::Serialize;
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::api::dto::CreateParticipantRequest;
use crate::domain::{EventId, Participant};
use crate::error::ClientError;
use crate::session::SessionManager;

/// Fallback shown when registration fails without a server message.
pub const REGISTER_FAILED_MESSAGE: &str = "An error occurred while registering for the team";

/// Fallback shown when the participant list cannot be loaded.
const CHECK_FAILED_MESSAGE: &str = "Failed to check registration status";

/// Participant name used when the session has no username.
const FALLBACK_PARTICIPANT_NAME: &str = "User";

/// Registration status of the session user for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum RegistrationState {
    /// Not checked yet.
    Unknown,
    /// Participant list is being fetched.
    Checking,
    /// The session user has a participant row for the event.
    Registered,
    /// No matching participant row.
    NotRegistered,
    /// A registration request is in flight.
    Registering,
    /// The last check or registration failed with this message.
    Failed(String),
}

impl RegistrationState {
    /// Returns `true` while a request owned by the flow is running.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Checking | Self::Registering)
    }
}

/// Returns `true` if `participants` contains a row for `user_id` on
/// `event_id`.
///
/// Rows for other events are ignored even if the backend returned them.
#[must_use]
pub fn is_registered(participants: &[Participant], event_id: EventId, user_id: &str) -> bool {
    participants.iter().any(|p| p.matches(event_id, user_id))
}

/// Drives the registration state of one event.
#[derive(Debug)]
pub struct RegistrationFlow {
    api: ApiClient,
    sessions: SessionManager,
    event_id: EventId,
    state: watch::Sender<RegistrationState>,
}

impl RegistrationFlow {
    /// Creates a flow in the [`RegistrationState::Unknown`] state.
    #[must_use]
    pub fn new(api: ApiClient, sessions: SessionManager, event_id: EventId) -> Self {
        let (state, _) = watch::channel(RegistrationState::Unknown);
        Self {
            api,
            sessions,
            event_id,
            state,
        }
    }

    /// Event this flow belongs to.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RegistrationState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RegistrationState> {
        self.state.subscribe()
    }

    /// Lists the event's participants and derives the registered flag.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] without contacting the server
    /// when no session exists, [`ClientError::RegistrationInFlight`] while
    /// a registration is running, or the backend's error.
    pub async fn check_registration_status(&self) -> Result<bool, ClientError> {
        let auth = self.sessions.require_auth()?;

        let started = self.state.send_if_modified(|state| {
            if *state == RegistrationState::Registering {
                return false;
            }
            *state = RegistrationState::Checking;
            true
        });
        if !started {
            return Err(ClientError::RegistrationInFlight(self.event_id));
        }
        let in_flight = InFlight::new(&self.state);

        let result = self
            .list_registered(&auth.access_token, &auth.user_id)
            .await;
        in_flight.settle(match &result {
            Ok(true) => RegistrationState::Registered,
            Ok(false) => RegistrationState::NotRegistered,
            Err(e) => RegistrationState::Failed(e.user_message(CHECK_FAILED_MESSAGE)),
        });
        result
    }

    /// Registers the session user as a participant.
    ///
    /// At most one registration is in flight per flow. On success the
    /// participant list is re-fetched; nothing is inserted locally. If
    /// the returned future is dropped before it completes, the state
    /// falls back to [`RegistrationState::Unknown`].
    ///
    /// # Errors
    ///
    /// * [`ClientError::NotLoggedIn`] when no session exists.
    /// * [`ClientError::RegistrationInFlight`] on a double submit.
    /// * [`ClientError::AlreadyRegistered`] when already registered.
    /// * The backend's error; its message is kept in
    ///   [`RegistrationState::Failed`].
    pub async fn register(&self) -> Result<(), ClientError> {
        let auth = self.sessions.require_auth()?;
        let account_id = auth.account_id()?;

        let mut rejection = None;
        self.state.send_if_modified(|state| match state {
            RegistrationState::Registering | RegistrationState::Checking => {
                rejection = Some(ClientError::RegistrationInFlight(self.event_id));
                false
            }
            RegistrationState::Registered => {
                rejection = Some(ClientError::AlreadyRegistered(self.event_id));
                false
            }
            _ => {
                *state = RegistrationState::Registering;
                true
            }
        });
        if let Some(err) = rejection {
            return Err(err);
        }
        let in_flight = InFlight::new(&self.state);

        let request = CreateParticipantRequest {
            account_id,
            event_id: self.event_id,
            participant_name: auth
                .username
                .clone()
                .unwrap_or_else(|| FALLBACK_PARTICIPANT_NAME.to_string()),
        };

        if let Err(e) = self
            .api
            .create_participant(&request, &auth.access_token)
            .await
        {
            tracing::warn!(event_id = %self.event_id, error = %e, "registration failed");
            in_flight.settle(RegistrationState::Failed(
                e.user_message(REGISTER_FAILED_MESSAGE),
            ));
            return Err(e);
        }
        tracing::info!(event_id = %self.event_id, %account_id, "registered for event");

        match self
            .list_registered(&auth.access_token, &auth.user_id)
            .await
        {
            Ok(true) => in_flight.settle(RegistrationState::Registered),
            Ok(false) => in_flight.settle(RegistrationState::NotRegistered),
            Err(e) => {
                // The POST went through; only the follow-up listing failed.
                tracing::warn!(event_id = %self.event_id, error = %e, "failed to re-check registration");
                in_flight.settle(RegistrationState::Unknown);
            }
        }
        Ok(())
    }

    async fn list_registered(&self, token: &str, user_id: &str) -> Result<bool, ClientError> {
        let participants = self.api.list_participants(self.event_id, token).await?;
        Ok(is_registered(&participants, self.event_id, user_id))
    }
}

/// Owns a busy state (`Checking` or `Registering`) until the request
/// settles it.
///
/// Dropped without [`InFlight::settle`], it moves a still-busy state back
/// to [`RegistrationState::Unknown`] so the flow can be driven again.
struct InFlight<'a> {
    state: &'a watch::Sender<RegistrationState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    const fn new(state: &'a watch::Sender<RegistrationState>) -> Self {
        Self { state, armed: true }
    }

    fn settle(mut self, next: RegistrationState) {
        self.armed = false;
        self.state.send_replace(next);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let reset = self.state.send_if_modified(|state| {
            if !state.is_busy() {
                return false;
            }
            *state = RegistrationState::Unknown;
            true
        });
        if reset {
            tracing::debug!("abandoned registration request, state reset");
        }
    }
}
