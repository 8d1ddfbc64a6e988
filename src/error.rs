//! Client error types with user-facing message mapping.
//!
//! [`ClientError`] is the central error type of the crate. Each variant
//! belongs to one of the failure categories the views distinguish:
//!
//! | Category      | Variants                                   | Shown to the user            |
//! |---------------|--------------------------------------------|------------------------------|
//! | Transport     | `Transport`, `Decode`, `UnexpectedResponse` | generic per-action message   |
//! | Application   | `Api`                                      | server message, verbatim     |
//! | Precondition  | `NotLoggedIn`                              | "You need to login first"    |
//! | Local         | everything else                            | the error's own text         |
//!
//! Nothing is retried: every error is terminal for the action that
//! triggered it.

use crate::api::ApiMessage;
use crate::domain::EventId;

/// Message shown when a session precondition fails.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You need to login first";

/// Client-side error enum.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a `success: false` envelope.
    #[error("{0}")]
    Api(ApiMessage),

    /// The backend answered with something that is not an envelope.
    #[error("unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body, truncated.
        body: String,
    },

    /// The envelope payload did not match the expected shape.
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// No session token or user id is stored.
    #[error("You need to login first")]
    NotLoggedIn,

    /// The secure session store could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Local form validation failed before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The owning view scope was cancelled before the request finished.
    #[error("request cancelled")]
    Cancelled,

    /// A registration for this event is already being submitted.
    #[error("a registration for event {0} is already in progress")]
    RegistrationInFlight(EventId),

    /// The session user is already registered for this event.
    #[error("you are already registered for event {0}")]
    AlreadyRegistered(EventId),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns a short machine-readable category for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::UnexpectedResponse { .. } | Self::Decode(_) => "transport",
            Self::Api(_) => "api",
            Self::NotLoggedIn => "not_logged_in",
            Self::Storage(_) => "storage",
            Self::Validation(_) => "validation",
            Self::Cancelled => "cancelled",
            Self::RegistrationInFlight(_) | Self::AlreadyRegistered(_) => "registration",
            Self::Config(_) => "config",
        }
    }

    /// Returns the text a view should show for this error.
    ///
    /// Transport failures collapse to `fallback` (for example
    /// `"An error occurred while creating the event."`). Application
    /// failures show the server message, or `fallback` when the server
    /// sent none.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.alert_text(fallback, fallback)
    }

    /// Like [`user_message`](Self::user_message), with a separate text
    /// for a `success: false` envelope that carries no message.
    ///
    /// Event creation uses this to tell `"Failed to create event."`
    /// apart from a request that never reached the backend.
    #[must_use]
    pub fn alert_text(&self, transport: &str, rejected: &str) -> String {
        match self {
            Self::Transport(_) | Self::UnexpectedResponse { .. } | Self::Decode(_) => {
                transport.to_string()
            }
            Self::Api(message) if message.is_empty() => rejected.to_string(),
            Self::Api(message) => message.joined(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_shown_verbatim_and_joined() {
        let err = ClientError::Api(ApiMessage::Many(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(err.user_message("fallback"), "a, b");
        assert_eq!(err.kind(), "api");
    }

    #[test]
    fn empty_api_message_uses_fallback() {
        let err = ClientError::Api(ApiMessage::None);
        assert_eq!(err.user_message("Failed to create event."), "Failed to create event.");
    }

    #[test]
    fn transport_like_errors_use_fallback() {
        let err = ClientError::UnexpectedResponse {
            status: 502,
            body: "<html>".to_string(),
        };
        assert_eq!(err.user_message("generic"), "generic");

        let Err(decode) = serde_json::from_str::<u8>("nope") else {
            return;
        };
        assert_eq!(ClientError::from(decode).user_message("generic"), "generic");
    }

    #[test]
    fn rejection_without_message_differs_from_transport_failure() {
        let transport = "An error occurred while creating the event.";
        let rejected = "Failed to create event.";

        let err = ClientError::Api(ApiMessage::None);
        assert_eq!(err.alert_text(transport, rejected), rejected);

        let err = ClientError::UnexpectedResponse {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.alert_text(transport, rejected), transport);

        let err = ClientError::Api(ApiMessage::One("Category missing".to_string()));
        assert_eq!(err.alert_text(transport, rejected), "Category missing");
    }

    #[test]
    fn not_logged_in_has_fixed_text() {
        assert_eq!(
            ClientError::NotLoggedIn.user_message("ignored"),
            "You need to login first"
        );
    }
}
