//! Device-local key-value storage backends.
//!
//! The persistence adapter talks to storage through the [`KeyValueStorage`]
//! seam: a single namespaced key mapping to a raw string payload. Backends
//! only move bytes; payload layout and fallback policy live in
//! [`super::persistence`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::AppError;

/// A device-local key-value store.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value at `key`. Absence is `Ok(None)`, not an error.
    async fn load(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Write `value` at `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
}

#[async_trait]
impl<S: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<S> {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).save(key, value).await
    }
}

// =============================================================================
// FileStorage
// =============================================================================

/// File-backed storage: one file per key under a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a torn payload and two snapshots can never interleave
/// on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `base_dir`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Map a namespaced key (e.g., `"@prickly_pear:cart_items"`) to a file
    /// path, replacing characters that are unsafe in file names.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.base_dir).await?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory storage for tests and ephemeral sessions.
///
/// Failures can be injected per direction to exercise the adapter's
/// swallow-and-continue policy.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.into(), value.into());
        storage
    }

    /// Make every subsequent `load` fail.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `save` fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Current value at `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(AppError::storage("injected load failure"));
        }
        Ok(self.get(key))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::storage("injected save failure"));
        }
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("key").await.unwrap(), None);

        storage.save("key", "value").await.unwrap();
        assert_eq!(storage.load("key").await.unwrap(), Some("value".to_string()));
        assert_eq!(storage.save_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_storage_failure_injection() {
        let storage = MemoryStorage::new();
        storage.set_fail_saves(true);
        assert!(storage.save("key", "value").await.is_err());

        storage.set_fail_saves(false);
        storage.save("key", "value").await.unwrap();
        storage.set_fail_loads(true);
        assert!(storage.load("key").await.is_err());
    }

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.load("@ns:key").await.unwrap(), None);
        storage.save("@ns:key", "[1,2,3]").await.unwrap();
        assert_eq!(
            storage.load("@ns:key").await.unwrap(),
            Some("[1,2,3]".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_storage_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.save("key", "first").await.unwrap();
        storage.save("key", "second").await.unwrap();
        assert_eq!(storage.load("key").await.unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_key_sanitization() {
        let storage = FileStorage::new("/data");
        let path = storage.path_for("@prickly_pear:cart_items");
        assert_eq!(
            path,
            PathBuf::from("/data/_prickly_pear_cart_items.json")
        );
    }
}
