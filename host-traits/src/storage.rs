//! Durable Key-Value Storage Abstraction
//!
//! Provides a platform-agnostic trait for the process-wide preference store
//! the shell persists its offline data into.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;

/// Durable string key-value storage trait
///
/// Abstracts platform-specific preference storage:
/// - Android: SharedPreferences / DataStore
/// - iOS: UserDefaults
/// - Desktop: SQLite-backed store (see `host-desktop`)
///
/// Values are opaque strings; callers layer their own encoding on top. A
/// single `set` must be atomic with respect to concurrent readers of the same
/// key, but the trait makes no cross-key or read-modify-write guarantee —
/// callers needing that must serialize access themselves.
///
/// # Example
///
/// ```ignore
/// use host_traits::storage::PreferenceStore;
///
/// async fn remember(store: &dyn PreferenceStore) -> Result<()> {
///     store.set("last_origin", "https://watch.example").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Retrieve a value
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous value for the key
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key
    ///
    /// Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check if a key exists without retrieving it
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Delete every key in the store
    async fn clear(&self) -> Result<()>;
}

/// In-memory preference store for tests and development
///
/// Not durable; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryPreferenceStore::new();

        store.set("key", "value").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some("value".to_string()));
        assert!(store.contains("key").await.unwrap());

        store.remove("key").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_overwrite_and_clear() {
        let store = MemoryPreferenceStore::new();

        store.set("key", "first").await.unwrap();
        store.set("key", "second").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some("second".to_string()));

        store.set("other", "value").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
        assert_eq!(store.get("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_ok() {
        let store = MemoryPreferenceStore::new();
        store.remove("missing").await.unwrap();
    }
}
