//! Request and response bodies for accounts, login and participants.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, EventId};

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password, sent over the configured transport.
    pub password: String,
}

/// `data` of a successful `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// The authenticated account.
    pub account: LoginAccount,
    /// Bearer token for subsequent requests.
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Account summary embedded in [`LoginResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct LoginAccount {
    /// Account id, stored in the session as `userId`.
    pub id: AccountId,
    /// Username echoed by the backend, when present.
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of `POST /accounts`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountRequest {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Optional contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Body of `POST /participants`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateParticipantRequest {
    /// Registering account.
    pub account_id: AccountId,
    /// Event joined.
    pub event_id: EventId,
    /// Display name; the session username.
    pub participant_name: String,
}

/// Query string of `GET /participants`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticipantFilter {
    /// Only participants of this event.
    pub event_id: EventId,
}
