//! Secure key/value storage for session data.
//!
//! [`SecureStore`] is the seam between the session logic and the
//! platform's secret storage. Two implementations ship with the crate:
//! [`FileSecureStore`] (a JSON file readable only by the current user)
//! and [`MemorySecureStore`] (process-local, for tests and ephemeral
//! runs).

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::ClientError;

/// Key/value store for secrets that must survive restarts.
pub trait SecureStore: Send + Sync + Debug {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the backing store is unreadable.
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the backing store is unwritable.
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    /// Deletes a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the backing store is unwritable.
    fn delete(&self, key: &str) -> Result<(), ClientError>;
}

/// In-memory store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemorySecureStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStore for MemorySecureStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), ClientError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// JSON file store with owner-only permissions.
///
/// The whole map is rewritten on every change through a temporary file
/// and a rename, so a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileSecureStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSecureStore {
    /// Creates a store backed by `path`. The file is created lazily.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        restrict_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), ClientError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        change(&mut map);
        self.write_map(&map)
    }
}

impl SecureStore for FileSecureStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> Result<(), ClientError> {
        self.update(|map| {
            map.remove(key);
        })
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn exercise(store: &dyn SecureStore) {
        assert!(matches!(store.get("accessToken"), Ok(None)));

        assert!(store.set("accessToken", "tok").is_ok());
        assert!(matches!(store.get("accessToken"), Ok(Some(v)) if v == "tok"));

        assert!(store.set("accessToken", "tok2").is_ok());
        assert!(matches!(store.get("accessToken"), Ok(Some(v)) if v == "tok2"));

        assert!(store.delete("accessToken").is_ok());
        assert!(matches!(store.get("accessToken"), Ok(None)));
        assert!(store.delete("accessToken").is_ok());
    }

    #[test]
    fn memory_store_round_trips() {
        exercise(&MemorySecureStore::new());
    }

    #[test]
    fn file_store_round_trips() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        exercise(&FileSecureStore::new(dir.path().join("nested").join("session.json")));
    }

    #[test]
    fn file_store_survives_reopen() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("session.json");
        assert!(FileSecureStore::new(&path).set("userId", "7").is_ok());

        let reopened = FileSecureStore::new(&path);
        assert!(matches!(reopened.get("userId"), Ok(Some(v)) if v == "7"));
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = FileSecureStore::new(dir.path().join("session.json"));
        assert!(store.set("accessToken", "tok").is_ok());
        let Ok(meta) = std::fs::metadata(store.path()) else {
            panic!("metadata");
        };
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("session.json");
        assert!(std::fs::write(&path, b"{not json").is_ok());
        let store = FileSecureStore::new(&path);
        assert!(matches!(store.get("userId"), Err(ClientError::Decode(_))));
    }
}
