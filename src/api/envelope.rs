//! The `{ success, data, message }` envelope every endpoint returns.
//!
//! Envelopes are decoded exactly once, at the client boundary, into an
//! [`ApiOutcome`]. Nothing past [`crate::api::ApiClient`] ever looks at a
//! raw `success` flag.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// The `message` field of an envelope.
///
/// The backend sends either a single string or a list of validation
/// messages; a list is presented joined with `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiMessage {
    /// No message, or `null`.
    #[default]
    None,
    /// `"message": "Event not found"`
    One(String),
    /// `"message": ["name is required", "location is required"]`
    Many(Vec<String>),
}

impl ApiMessage {
    /// Renders the message for display.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::One(message) => message.clone(),
            Self::Many(messages) => messages.join(", "),
        }
    }

    /// Returns `true` if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::One(message) => message.is_empty(),
            Self::Many(messages) => messages.iter().all(String::is_empty),
        }
    }
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Wire shape of the envelope.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    message: ApiMessage,
}

/// Decoded envelope: the payload on success, the message on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// `success: true`, `data` decoded as `T`.
    Ok(T),
    /// `success: false`.
    Err(ApiMessage),
}

impl<T: DeserializeOwned> ApiOutcome<T> {
    /// Decodes an envelope from a response body.
    ///
    /// A missing `data` field on success decodes as JSON `null`, so `T`
    /// may be `()` or an `Option` for endpoints that return no payload.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not an envelope or
    /// `data` does not match `T`.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawEnvelope = serde_json::from_slice(body)?;
        if raw.success {
            let data = raw.data.unwrap_or(serde_json::Value::Null);
            Ok(Self::Ok(serde_json::from_value(data)?))
        } else {
            Ok(Self::Err(raw.message))
        }
    }
}

impl<T> ApiOutcome<T> {
    /// Converts the outcome into the crate's `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for a `success: false` envelope.
    pub fn into_result(self) -> Result<T, ClientError> {
        match self {
            Self::Ok(data) => Ok(data),
            Self::Err(message) => Err(ClientError::Api(message)),
        }
    }
}
