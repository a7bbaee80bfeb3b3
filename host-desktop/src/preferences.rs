//! Preference Storage using SQLite

use async_trait::async_trait;
use host_traits::{
    error::{HostError, Result},
    storage::PreferenceStore,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool},
    Row,
};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// SQLite-backed preference store implementation
///
/// Provides durable key-value storage using SQLite:
/// - Single-key write atomicity via upsert
/// - Async operations
pub struct SqlitePreferenceStore {
    pool: SqlitePool,
}

impl SqlitePreferenceStore {
    /// Create a new preference store with the given database path
    pub async fn new(db_path: PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(HostError::Io)?;
        }

        let path_str = db_path.to_string_lossy().replace('\\', "/");
        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path_str))
            .map_err(|e| HostError::OperationFailed(format!("Invalid DB path: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| HostError::OperationFailed(format!("Failed to connect to DB: {}", e)))?;

        let store = Self { pool };
        store.create_table().await?;

        debug!(path = ?db_path, "Initialized preference store");

        Ok(store)
    }

    /// Create an in-memory preference store (for testing)
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .map_err(|e| HostError::OperationFailed(format!("Failed to connect to DB: {}", e)))?;

        let store = Self { pool };
        store.create_table().await?;

        Ok(store)
    }

    async fn create_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| HostError::OperationFailed(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    /// Get the current Unix timestamp
    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| HostError::OperationFailed(format!("Failed to get preference: {}", e)))?;

        Ok(row.map(|row| row.get(0)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Self::now())
        .execute(&self.pool)
        .await
        .map_err(|e| HostError::OperationFailed(format!("Failed to set preference: {}", e)))?;

        debug!(key = key, "Stored preference");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM preferences WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                HostError::OperationFailed(format!("Failed to delete preference: {}", e))
            })?;

        debug!(key = key, "Deleted preference");
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| HostError::OperationFailed(format!("Failed to check key: {}", e)))?;

        Ok(row.is_some())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM preferences")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                HostError::OperationFailed(format!("Failed to clear preferences: {}", e))
            })?;

        debug!("Cleared all preferences");
        Ok(())
    }
}
