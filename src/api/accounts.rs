//! Account, login and participant endpoints.

use super::ApiClient;
use super::dto::{
    CreateAccountRequest, CreateParticipantRequest, LoginRequest, LoginResponse, ParticipantFilter,
};
use crate::domain::{Account, AccountId, EventId, Participant};
use crate::error::ClientError;

impl ApiClient {
    /// `POST /login`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure,
    /// including rejected credentials.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.post("/login", request, None).await
    }

    /// `GET /accounts`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn list_accounts(&self, token: &str) -> Result<Vec<Account>, ClientError> {
        self.get("/accounts", Some(token)).await
    }

    /// `GET /accounts/{id}`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn get_account(&self, id: AccountId, token: &str) -> Result<Account, ClientError> {
        self.get(&format!("/accounts/{id}"), Some(token)).await
    }

    /// `POST /accounts`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn create_account(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<Account, ClientError> {
        self.post("/accounts", request, None).await
    }

    /// `GET /participants?event_id={id}`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn list_participants(
        &self,
        event_id: EventId,
        token: &str,
    ) -> Result<Vec<Participant>, ClientError> {
        self.get_with_query("/participants", &ParticipantFilter { event_id }, Some(token))
            .await
    }

    /// `POST /participants`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure,
    /// including server-side validation messages.
    pub async fn create_participant(
        &self,
        request: &CreateParticipantRequest,
        token: &str,
    ) -> Result<Participant, ClientError> {
        self.post("/participants", request, Some(token)).await
    }
}
