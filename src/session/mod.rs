//! Session persistence: the secure store seam and the session triple
//! kept in it.

pub mod manager;
pub mod store;

pub use manager::{AuthContext, SessionManager, StoredSession};
pub use store::{FileSecureStore, MemorySecureStore, SecureStore};
