//! Client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Command-line flags override them.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

/// Backend base URL used when `MATCHDAY_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3002/api/v1";

/// Default capacity of the store's change bus.
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

/// Top-level client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_url: String,

    /// File backing the secure session store.
    pub session_file: PathBuf,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub request_timeout: Option<Duration>,

    /// Capacity of the [`crate::domain::EventBus`] broadcast channel.
    pub event_bus_capacity: usize,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` first to optionally load a `.env`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `MATCHDAY_API_URL` is not an
    /// `http(s)://` URL.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let api_url = lookup("MATCHDAY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = validate_api_url(&api_url)?;

        let session_file = lookup("MATCHDAY_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(
                || default_session_file(lookup("HOME")),
                PathBuf::from,
            );

        let request_timeout = parse_var::<u64>(&lookup, "MATCHDAY_REQUEST_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let event_bus_capacity = parse_var(&lookup, "MATCHDAY_EVENT_BUS_CAPACITY")
            .unwrap_or(DEFAULT_EVENT_BUS_CAPACITY);

        let log_json = parse_bool(&lookup, "MATCHDAY_LOG_JSON", false);

        Ok(Self {
            api_url,
            session_file,
            request_timeout,
            event_bus_capacity,
            log_json,
        })
    }

    /// Applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the overriding URL is invalid.
    pub fn with_overrides(
        mut self,
        api_url: Option<&str>,
        session_file: Option<PathBuf>,
    ) -> Result<Self, ClientError> {
        if let Some(url) = api_url {
            self.api_url = validate_api_url(url)?;
        }
        if let Some(path) = session_file {
            self.session_file = path;
        }
        Ok(self)
    }
}

fn validate_api_url(url: &str) -> Result<String, ClientError> {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(ClientError::Config(format!(
            "MATCHDAY_API_URL must start with http:// or https://, got {url:?}"
        )))
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(".matchday").join("session.json"),
        None => PathBuf::from(".matchday-session.json"),
    }
}

/// Parses a variable as `T`, returning `None` on missing or invalid values.
fn parse_var<T: std::str::FromStr>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_bool(lookup: impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
