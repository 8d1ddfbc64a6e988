//! HTTP client wrapper for the matchday backend.
//!
//! [`ApiClient`] owns the base URL and a pooled [`reqwest::Client`]. Every
//! call decodes the response envelope once and hands back either the
//! typed payload or a [`ClientError`].

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ApiOutcome;
use crate::error::ClientError;

/// Longest response body kept in [`ClientError::UnexpectedResponse`].
const MAX_ERROR_BODY: usize = 512;

/// Thin REST client for the backend.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` (for example
    /// `http://localhost:3002/api/v1`).
    ///
    /// `timeout` overrides the HTTP client's default when set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    /// Returns the configured base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {path}` and decode the envelope payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a `success: false`
    /// envelope, or a payload that does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path, token)).await
    }

    /// `GET {path}?{query}` and decode the envelope payload.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path, token).query(query))
            .await
    }

    /// `POST {path}` with a JSON body and decode the envelope payload.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path, token).json(body))
            .await
    }

    /// `DELETE {path}`; the payload, if any, is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ClientError> {
        let _: serde::de::IgnoredAny = self
            .send(self.request(Method::DELETE, path, token))
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, authenticated = token.is_some(), "api request");
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "api response");

        // Failures carry an envelope too (400 with validation messages,
        // 401 with "Unauthorized"), so decode before looking at the status.
        match ApiOutcome::<T>::decode(&body) {
            Ok(outcome) => outcome.into_result(),
            Err(_) if !status.is_success() => Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body: truncate(&String::from_utf8_lossy(&body), MAX_ERROR_BODY),
            }),
            Err(e) => Err(ClientError::Decode(e)),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", text.get(..idx).unwrap_or_default()),
        None => text.to_string(),
    }
}
