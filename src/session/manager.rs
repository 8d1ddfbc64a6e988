//! The signed-in session: `userId`, `username`, `accessToken`.

use std::sync::Arc;

use serde::Serialize;

use super::SecureStore;
use crate::api::dto::LoginResponse;
use crate::domain::AccountId;
use crate::error::ClientError;

/// Secure-store key of the account id.
pub const USER_ID_KEY: &str = "userId";
/// Secure-store key of the username.
pub const USERNAME_KEY: &str = "username";
/// Secure-store key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Session values as currently stored. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoredSession {
    /// Account id, as a string.
    pub user_id: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Bearer token.
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
}

impl StoredSession {
    /// Returns `true` when nothing at all is stored.
    #[must_use]
    pub const fn is_logged_out(&self) -> bool {
        self.user_id.is_none() && self.username.is_none() && self.access_token.is_none()
    }
}

/// Credentials required by authenticated actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Account id, as stored.
    pub user_id: String,
    /// Username, when stored.
    pub username: Option<String>,
    /// Bearer token.
    pub access_token: String,
}

impl AuthContext {
    /// Parses the stored user id as an [`AccountId`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] if the stored id is not an
    /// integer; such a session cannot be used for any request.
    pub fn account_id(&self) -> Result<AccountId, ClientError> {
        self.user_id
            .parse()
            .map_err(|_| ClientError::NotLoggedIn)
    }
}

/// Reads and writes the session triple in a [`SecureStore`].
///
/// There is no expiry or refresh logic: a token the backend rejects is
/// reported to the caller but stays stored.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<dyn SecureStore>,
}

impl SessionManager {
    /// Creates a manager over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self { store }
    }

    /// Reads all three values.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] or [`ClientError::Decode`] if the
    /// store is unreadable.
    pub fn current(&self) -> Result<StoredSession, ClientError> {
        Ok(StoredSession {
            user_id: self.read(USER_ID_KEY)?,
            username: self.read(USERNAME_KEY)?,
            access_token: self.read(ACCESS_TOKEN_KEY)?,
        })
    }

    /// Returns the credentials for an authenticated action.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] when either the token or the
    /// user id is missing, without contacting the server.
    pub fn require_auth(&self) -> Result<AuthContext, ClientError> {
        let session = self.current()?;
        match (session.user_id, session.access_token) {
            (Some(user_id), Some(access_token)) => Ok(AuthContext {
                user_id,
                username: session.username,
                access_token,
            }),
            _ => Err(ClientError::NotLoggedIn),
        }
    }

    /// Returns the token and username needed to author an event.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] when either is missing.
    pub fn require_author(&self) -> Result<(String, String), ClientError> {
        let token = self.read(ACCESS_TOKEN_KEY)?;
        let username = self.read(USERNAME_KEY)?;
        match (token, username) {
            (Some(token), Some(username)) => Ok((token, username)),
            _ => Err(ClientError::NotLoggedIn),
        }
    }

    /// Persists a successful login.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store is unwritable.
    pub fn save_login(&self, login: &LoginResponse, username: &str) -> Result<(), ClientError> {
        let username = login.account.username.as_deref().unwrap_or(username);
        self.store
            .set(USER_ID_KEY, &login.account.id.to_string())?;
        self.store.set(USERNAME_KEY, username)?;
        self.store.set(ACCESS_TOKEN_KEY, &login.access_token)?;
        Ok(())
    }

    /// Removes all three values.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store is unwritable.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.store.delete(USER_ID_KEY)?;
        self.store.delete(USERNAME_KEY)?;
        self.store.delete(ACCESS_TOKEN_KEY)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.store.get(key)?.filter(|v| !v.is_empty()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::session::MemorySecureStore;

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(MemorySecureStore::new()))
    }

    fn login(id: i64, token: &str) -> LoginResponse {
        let json = format!(r#"{{"account": {{"id": {id}}}, "accessToken": "{token}"}}"#);
        let Ok(login) = serde_json::from_str(&json) else {
            panic!("login response should decode");
        };
        login
    }

    #[test]
    fn empty_store_is_logged_out() {
        let Ok(session) = manager().current() else {
            panic!("read failed");
        };
        assert!(session.is_logged_out());
        assert!(matches!(manager().require_auth(), Err(ClientError::NotLoggedIn)));
    }

    #[test]
    fn save_login_persists_string_id_and_token() {
        let sessions = manager();
        assert!(sessions.save_login(&login(7, "tok"), "budi").is_ok());

        let Ok(session) = sessions.current() else {
            panic!("read failed");
        };
        assert_eq!(session.user_id.as_deref(), Some("7"));
        assert_eq!(session.username.as_deref(), Some("budi"));
        assert_eq!(session.access_token.as_deref(), Some("tok"));

        let Ok(auth) = sessions.require_auth() else {
            panic!("expected auth context");
        };
        assert_eq!(auth.account_id().ok(), Some(AccountId::new(7)));
    }

    #[test]
    fn token_without_user_id_is_not_logged_in() {
        let store = Arc::new(MemorySecureStore::new());
        assert!(store.set(ACCESS_TOKEN_KEY, "tok").is_ok());
        let sessions = SessionManager::new(store);
        assert!(matches!(sessions.require_auth(), Err(ClientError::NotLoggedIn)));
        assert!(matches!(sessions.require_author(), Err(ClientError::NotLoggedIn)));
    }

    #[test]
    fn clear_removes_everything() {
        let sessions = manager();
        assert!(sessions.save_login(&login(1, "t"), "u").is_ok());
        assert!(sessions.clear().is_ok());
        let Ok(session) = sessions.current() else {
            panic!("read failed");
        };
        assert!(session.is_logged_out());
    }
}
