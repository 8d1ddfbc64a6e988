//! Participant and account records.

use serde::{Deserialize, Serialize};

use super::{AccountId, EventId};

/// A record linking an account to an event it has joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Backend identifier.
    pub id: i64,
    /// Event joined.
    pub event_id: EventId,
    /// Account that joined.
    pub account_id: AccountId,
    /// Display name captured at registration time.
    #[serde(default)]
    pub participant_name: String,
}

impl Participant {
    /// Returns `true` if this row belongs to the session user on `event_id`.
    ///
    /// The session keeps the user id as a string, so the comparison is
    /// done on the string form of the account id.
    #[must_use]
    pub fn matches(&self, event_id: EventId, session_user_id: &str) -> bool {
        self.event_id == event_id && self.account_id.to_string() == session_user_id
    }
}

/// A user account as returned by `GET /accounts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Backend identifier.
    pub id: AccountId,
    /// Login name.
    pub username: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
}
