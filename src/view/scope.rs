//! Cooperative cancellation tied to a view's lifetime.
//!
//! A [`ViewScope`] is created when a view appears and dropped when it
//! goes away. Requests run through the scope are aborted on drop, and
//! [`ViewScope::commit`] refuses to apply a late response to shared
//! state once the scope is gone. This removes the update-after-unmount
//! hazard of fire-and-forget requests.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::ClientError;

/// Lifetime of one consuming view.
///
/// Dropping the scope cancels every request started through it.
#[derive(Debug)]
pub struct ViewScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ViewScope {
    /// Opens a new, independent scope.
    #[must_use]
    pub fn new() -> Self {
        Self::from_token(CancellationToken::new())
    }

    /// Opens a scope that is also cancelled when `self` is.
    #[must_use]
    pub fn child(&self) -> Self {
        Self::from_token(self.token.child_token())
    }

    fn from_token(token: CancellationToken) -> Self {
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    /// Cancels the scope without dropping it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once the scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drives `fut` until it completes or the scope is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] if the scope is cancelled first,
    /// otherwise whatever `fut` returns.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(ClientError::Cancelled),
            result = fut => result,
        }
    }

    /// Applies a state change only if the scope is still alive.
    ///
    /// Must be called without an `.await` between the check and the
    /// mutation, which `apply` being synchronous guarantees.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] if the scope is cancelled.
    pub fn commit<T>(&self, apply: impl FnOnce() -> T) -> Result<T, ClientError> {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        Ok(apply())
    }

    /// Spawns `fut` on the runtime; it is aborted when the scope ends.
    pub fn spawn<T, F>(&self, fut: F) -> JoinHandle<Result<T, ClientError>>
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
        T: Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => Err(ClientError::Cancelled),
                result = fut => result,
            }
        })
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
