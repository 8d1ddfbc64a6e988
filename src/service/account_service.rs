//! Account service: login, logout, sign-up and profile lookups.

use crate::api::ApiClient;
use crate::api::dto::{CreateAccountRequest, LoginRequest};
use crate::domain::{Account, AccountId};
use crate::error::ClientError;
use crate::session::SessionManager;

/// Fields of the sign-up form.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Repeated password.
    pub confirm_password: String,
    /// Optional phone number.
    pub phone_number: Option<String>,
}

impl SignUpForm {
    /// Checks the form before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] naming the first problem.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(ClientError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(ClientError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }
}

/// Orchestration layer for account operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    api: ApiClient,
    sessions: SessionManager,
}

impl AccountService {
    /// Creates a new `AccountService`.
    #[must_use]
    pub fn new(api: ApiClient, sessions: SessionManager) -> Self {
        Self { api, sessions }
    }

    /// Returns the session manager.
    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Logs in and persists the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when either field is empty,
    /// the backend's error, or [`ClientError::Storage`].
    pub async fn login(&self, username: &str, password: &str) -> Result<AccountId, ClientError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Please enter username and password".to_string(),
            ));
        }

        let response = self
            .api
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.sessions.save_login(&response, username)?;

        tracing::info!(account_id = %response.account.id, %username, "logged in");
        Ok(response.account.id)
    }

    /// Clears the stored session. There is no server-side logout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store is unwritable.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.sessions.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Fetches the signed-in account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] or the backend's error.
    pub async fn profile(&self) -> Result<Account, ClientError> {
        let auth = self.sessions.require_auth()?;
        self.api
            .get_account(auth.account_id()?, &auth.access_token)
            .await
    }

    /// Validates the form and creates an account.
    ///
    /// Does not log in; the caller does that with the same credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] or the backend's error.
    pub async fn sign_up(&self, form: SignUpForm) -> Result<Account, ClientError> {
        form.validate()?;

        let account = self
            .api
            .create_account(&CreateAccountRequest {
                username: form.username.trim().to_string(),
                email: form.email.trim().to_string(),
                password: form.password,
                phone_number: form.phone_number.filter(|p| !p.trim().is_empty()),
            })
            .await?;

        tracing::info!(account_id = %account.id, username = %account.username, "account created");
        Ok(account)
    }

    /// Lists all accounts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] or the backend's error.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ClientError> {
        let auth = self.sessions.require_auth()?;
        self.api.list_accounts(&auth.access_token).await
    }
}
