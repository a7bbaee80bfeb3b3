//! # Offline Report Store
//!
//! Persistent queue of observation reports captured while offline, plus the
//! signed-in session singleton, layered over a durable [`PreferenceStore`].
//!
//! ## Storage layout
//!
//! Two fixed logical keys:
//! - `pending_reports` — JSON array of report objects, in insertion order
//! - `user_session` — one JSON object, or absent
//!
//! Every mutation is a read-modify-write cycle: decode the current value,
//! apply the change, re-encode, persist. Each logical key carries its own
//! async mutex so two bridge calls issued back-to-back cannot interleave a
//! cycle and lose a write.
//!
//! ## Degradation
//!
//! Malformed stored data never surfaces as an error: a pending-report value
//! that fails to decode reads as the empty sequence, a malformed session
//! reads as absent, and both are logged. Only backend storage failures
//! propagate as [`StoreError`].

use host_traits::storage::PreferenceStore;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Logical key holding the serialized pending-report sequence
pub const KEY_PENDING_REPORTS: &str = "pending_reports";

/// Logical key holding the serialized session singleton
pub const KEY_USER_SESSION: &str = "user_session";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(#[from] host_traits::HostError),

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent store for pending reports and the user session
///
/// Explicitly constructed around an injected preference store handle; no
/// implicit global instance.
pub struct ReportStore {
    prefs: Arc<dyn PreferenceStore>,
    reports_guard: Mutex<()>,
    session_guard: Mutex<()>,
}

impl ReportStore {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            prefs,
            reports_guard: Mutex::new(()),
            session_guard: Mutex::new(()),
        }
    }

    /// Decode the stored report sequence, degrading to empty on bad data
    async fn read_reports(&self) -> Result<Vec<Value>> {
        let raw = match self.prefs.get(KEY_PENDING_REPORTS).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(reports) => Ok(reports),
            Err(e) => {
                warn!(error = %e, "Stored pending reports are malformed; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_reports(&self, reports: &[Value]) -> Result<()> {
        let encoded = serde_json::to_string(reports)?;
        self.prefs.set(KEY_PENDING_REPORTS, &encoded).await?;
        Ok(())
    }

    /// Append a report to the end of the pending sequence
    ///
    /// Returns the new sequence length.
    pub async fn append(&self, report: Value) -> Result<usize> {
        let _guard = self.reports_guard.lock().await;

        let mut reports = self.read_reports().await?;
        reports.push(report);
        self.write_reports(&reports).await?;

        debug!(total = reports.len(), "Saved pending report");
        Ok(reports.len())
    }

    /// The full pending sequence, in insertion order
    pub async fn list(&self) -> Result<Vec<Value>> {
        self.read_reports().await
    }

    /// Remove the report at `index`
    ///
    /// Survivors keep their relative order. An out-of-range index rewrites
    /// the sequence unchanged; it is a no-op, never an error.
    pub async fn remove_at(&self, index: usize) -> Result<()> {
        let _guard = self.reports_guard.lock().await;

        let reports = self.read_reports().await?;
        let remaining: Vec<Value> = reports
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, report)| report)
            .collect();

        self.write_reports(&remaining).await?;

        debug!(remaining = remaining.len(), "Removed pending report");
        Ok(())
    }

    /// Number of pending reports
    ///
    /// Always equals `list().len()`, including when the stored value is
    /// malformed (both degrade to empty).
    pub async fn count(&self) -> Result<usize> {
        Ok(self.read_reports().await?.len())
    }

    /// The session record, or `None` if absent or malformed
    pub async fn session(&self) -> Result<Option<Value>> {
        let raw = match self.prefs.get(KEY_USER_SESSION).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "Stored session is malformed; treating as absent");
                Ok(None)
            }
        }
    }

    /// Replace the session singleton wholesale
    pub async fn set_session(&self, session: Value) -> Result<()> {
        let _guard = self.session_guard.lock().await;

        let encoded = serde_json::to_string(&session)?;
        self.prefs.set(KEY_USER_SESSION, &encoded).await?;

        debug!("Saved user session");
        Ok(())
    }

    /// Empty the session slot
    pub async fn clear_session(&self) -> Result<()> {
        let _guard = self.session_guard.lock().await;

        self.prefs.remove(KEY_USER_SESSION).await?;

        debug!("Cleared user session");
        Ok(())
    }

    /// Erase both logical keys
    pub async fn clear_all(&self) -> Result<()> {
        let _reports = self.reports_guard.lock().await;
        let _session = self.session_guard.lock().await;

        self.prefs.remove(KEY_PENDING_REPORTS).await?;
        self.prefs.remove(KEY_USER_SESSION).await?;

        debug!("Cleared all offline data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use host_traits::storage::MemoryPreferenceStore;
    use serde_json::json;

    fn store() -> ReportStore {
        ReportStore::new(Arc::new(MemoryPreferenceStore::new()))
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let store = store();

        for i in 0..5 {
            store.append(json!({ "id": i })).await.unwrap();
        }

        let reports = store.list().await.unwrap();
        assert_eq!(reports.len(), 5);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report["id"], i);
        }
    }

    #[tokio::test]
    async fn test_remove_in_range_keeps_relative_order() {
        let store = store();
        for i in 0..4 {
            store.append(json!({ "id": i })).await.unwrap();
        }

        store.remove_at(1).await.unwrap();

        let reports = store.list().await.unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0]["id"], 0);
        assert_eq!(reports[1]["id"], 2);
        assert_eq!(reports[2]["id"], 3);
    }

    #[tokio::test]
    async fn test_remove_out_of_range_is_noop() {
        let store = store();
        store.append(json!({ "a": 1 })).await.unwrap();
        store.append(json!({ "b": 2 })).await.unwrap();

        store.remove_at(5).await.unwrap();

        let reports = store.list().await.unwrap();
        assert_eq!(reports, vec![json!({ "a": 1 }), json!({ "b": 2 })]);
    }

    #[tokio::test]
    async fn test_worked_example() {
        let store = store();

        store.append(json!({ "a": 1 })).await.unwrap();
        store.append(json!({ "b": 2 })).await.unwrap();
        assert_eq!(
            store.list().await.unwrap(),
            vec![json!({ "a": 1 }), json!({ "b": 2 })]
        );

        store.remove_at(0).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![json!({ "b": 2 })]);

        store.remove_at(5).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![json!({ "b": 2 })]);
    }

    #[tokio::test]
    async fn test_malformed_reports_degrade_to_empty() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs.set(KEY_PENDING_REPORTS, "not json at all").await.unwrap();
        let store = ReportStore::new(prefs);

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_array_reports_degrade_to_empty() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs
            .set(KEY_PENDING_REPORTS, r#"{"not":"an array"}"#)
            .await
            .unwrap();
        let store = ReportStore::new(prefs);

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_after_malformed_data_starts_fresh() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs.set(KEY_PENDING_REPORTS, "][").await.unwrap();
        let store = ReportStore::new(prefs);

        store.append(json!({ "id": 1 })).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![json!({ "id": 1 })]);
    }

    #[tokio::test]
    async fn test_count_matches_list_length() {
        let store = store();
        assert_eq!(store.count().await.unwrap(), 0);

        store.append(json!({ "id": 1 })).await.unwrap();
        store.append(json!({ "id": 2 })).await.unwrap();
        assert_eq!(
            store.count().await.unwrap(),
            store.list().await.unwrap().len()
        );
    }

    #[tokio::test]
    async fn test_session_roundtrip_and_clear() {
        let store = store();

        assert_eq!(store.session().await.unwrap(), None);

        let session = json!({ "user": "ranger-7", "token": "abc" });
        store.set_session(session.clone()).await.unwrap();
        assert_eq!(store.session().await.unwrap(), Some(session));

        let replacement = json!({ "user": "ranger-8" });
        store.set_session(replacement.clone()).await.unwrap();
        assert_eq!(store.session().await.unwrap(), Some(replacement));

        store.clear_session().await.unwrap();
        assert_eq!(store.session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_session_reads_as_absent() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs.set(KEY_USER_SESSION, "{truncated").await.unwrap();
        let store = ReportStore::new(prefs);

        assert_eq!(store.session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_all_erases_both_keys() {
        let store = store();
        store.append(json!({ "id": 1 })).await.unwrap();
        store.set_session(json!({ "user": "x" })).await.unwrap();

        store.clear_all().await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.session().await.unwrap(), None);
    }
}
