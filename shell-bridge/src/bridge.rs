//! The operation surface hosted content calls into.

use serde_json::Value;
use shell_location::LocationResolver;
use shell_store::ReportStore;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::sink::{ContentMessage, ContentSink, POSITION_UNAVAILABLE};

/// Bridge between hosted web content and local device services
///
/// Every operation is callable from the page and must never let a failure
/// escape as an uncaught error: decode failures degrade to safe defaults
/// (`"[]"`, `"null"`, `0`, dropped input) and are logged; location failures
/// arrive through the error callback. Structured payloads cross the bridge
/// as JSON strings in both directions.
pub struct WebBridge {
    store: Arc<ReportStore>,
    resolver: Arc<LocationResolver>,
    sink: Arc<dyn ContentSink>,
}

impl WebBridge {
    pub fn new(
        store: Arc<ReportStore>,
        resolver: Arc<LocationResolver>,
        sink: Arc<dyn ContentSink>,
    ) -> Self {
        Self {
            store,
            resolver,
            sink,
        }
    }

    /// Append an offline-captured report to the pending queue
    ///
    /// The input must be a JSON object; anything else is logged and dropped.
    pub async fn save_pending_report(&self, report_json: &str) {
        let report: Value = match serde_json::from_str(report_json) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Dropping unparseable pending report");
                return;
            }
        };
        if !report.is_object() {
            warn!("Dropping non-object pending report");
            return;
        }

        if let Err(e) = self.store.append(report).await {
            warn!(error = %e, "Failed to save pending report");
        }
    }

    /// The full pending queue as a JSON array string; `"[]"` on any failure
    pub async fn pending_reports(&self) -> String {
        match self.store.list().await {
            Ok(reports) => Value::Array(reports).to_string(),
            Err(e) => {
                warn!(error = %e, "Failed to read pending reports");
                "[]".to_string()
            }
        }
    }

    /// Remove the pending report at `index`; out-of-range is a no-op
    pub async fn remove_pending_report(&self, index: usize) {
        if let Err(e) = self.store.remove_at(index).await {
            warn!(error = %e, index, "Failed to remove pending report");
        }
    }

    /// Number of pending reports; `0` on any failure
    pub async fn pending_report_count(&self) -> usize {
        match self.store.count().await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "Failed to count pending reports");
                0
            }
        }
    }

    /// Replace the session singleton
    ///
    /// The input must be a JSON object; anything else is logged and dropped.
    pub async fn save_user_session(&self, session_json: &str) {
        let session: Value = match serde_json::from_str(session_json) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Dropping unparseable user session");
                return;
            }
        };
        if !session.is_object() {
            warn!("Dropping non-object user session");
            return;
        }

        if let Err(e) = self.store.set_session(session).await {
            warn!(error = %e, "Failed to save user session");
        }
    }

    /// The session record as a JSON string, or the literal `"null"` sentinel
    pub async fn user_session(&self) -> String {
        match self.store.session().await {
            Ok(Some(session)) => session.to_string(),
            Ok(None) => "null".to_string(),
            Err(e) => {
                warn!(error = %e, "Failed to read user session");
                "null".to_string()
            }
        }
    }

    /// Empty the session slot
    pub async fn clear_user_session(&self) {
        if let Err(e) = self.store.clear_session().await {
            warn!(error = %e, "Failed to clear user session");
        }
    }

    /// Resolve the current position and deliver it through the sink
    ///
    /// Fire-and-forget: the result arrives later as `onLocationReceived` or
    /// `onLocationError` in the hosted content, never as a return value. No
    /// automatic retry; the page re-invokes to try again.
    pub fn request_current_location(&self) {
        let resolver = self.resolver.clone();
        let sink = self.sink.clone();

        tokio::spawn(async move {
            let message = match resolver.resolve().await {
                Ok(position) => {
                    debug!("Resolved current location");
                    ContentMessage::LocationReceived(position)
                }
                Err(e) => {
                    warn!(error = %e, "Location request failed");
                    ContentMessage::LocationFailed {
                        code: POSITION_UNAVAILABLE,
                        message: e.to_string(),
                    }
                }
            };
            sink.deliver(message).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use host_traits::location::{
        LocationProvider, LocationUpdates, Position, SourceKind, UpdateParams,
    };
    use host_traits::storage::MemoryPreferenceStore;
    use host_traits::time::{Clock, SystemClock};
    use serde_json::json;
    use tokio::sync::mpsc;

    struct ChannelSink {
        tx: mpsc::UnboundedSender<ContentMessage>,
    }

    #[async_trait]
    impl ContentSink for ChannelSink {
        async fn deliver(&self, message: ContentMessage) {
            self.tx.send(message).ok();
        }
    }

    /// Provider whose last-known satellite fix is always fresh
    struct InstantFixProvider {
        permission: bool,
    }

    #[async_trait]
    impl LocationProvider for InstantFixProvider {
        async fn permission_granted(&self) -> bool {
            self.permission
        }

        async fn is_enabled(&self, _kind: SourceKind) -> host_traits::error::Result<bool> {
            Ok(true)
        }

        async fn last_known(
            &self,
            kind: SourceKind,
        ) -> host_traits::error::Result<Option<Position>> {
            Ok(match kind {
                SourceKind::Satellite => Some(Position {
                    latitude: 2.0,
                    longitude: 38.0,
                    accuracy: 8.0,
                    timestamp: SystemClock.unix_timestamp_millis(),
                }),
                SourceKind::Network => None,
            })
        }

        async fn subscribe(
            &self,
            _kinds: &[SourceKind],
            _params: UpdateParams,
        ) -> host_traits::error::Result<Box<dyn LocationUpdates>> {
            unreachable!("fast path should satisfy these tests")
        }
    }

    fn bridge_with(
        provider: Arc<dyn LocationProvider>,
    ) -> (WebBridge, mpsc::UnboundedReceiver<ContentMessage>) {
        let store = Arc::new(ReportStore::new(Arc::new(MemoryPreferenceStore::new())));
        let resolver = Arc::new(LocationResolver::new(provider, Arc::new(SystemClock)));
        let (tx, rx) = mpsc::unbounded_channel();
        (
            WebBridge::new(store, resolver, Arc::new(ChannelSink { tx })),
            rx,
        )
    }

    fn bridge() -> (WebBridge, mpsc::UnboundedReceiver<ContentMessage>) {
        bridge_with(Arc::new(InstantFixProvider { permission: true }))
    }

    #[tokio::test]
    async fn test_report_roundtrip_through_json_strings() {
        let (bridge, _rx) = bridge();

        bridge.save_pending_report(r#"{"a":1}"#).await;
        bridge.save_pending_report(r#"{"b":2}"#).await;

        let listed: Vec<Value> = serde_json::from_str(&bridge.pending_reports().await).unwrap();
        assert_eq!(listed, vec![json!({"a":1}), json!({"b":2})]);
        assert_eq!(bridge.pending_report_count().await, 2);

        bridge.remove_pending_report(0).await;
        let listed: Vec<Value> = serde_json::from_str(&bridge.pending_reports().await).unwrap();
        assert_eq!(listed, vec![json!({"b":2})]);

        bridge.remove_pending_report(5).await;
        let listed: Vec<Value> = serde_json::from_str(&bridge.pending_reports().await).unwrap();
        assert_eq!(listed, vec![json!({"b":2})]);
    }

    #[tokio::test]
    async fn test_unparseable_report_is_dropped() {
        let (bridge, _rx) = bridge();

        bridge.save_pending_report("{not json").await;

        assert_eq!(bridge.pending_reports().await, "[]");
        assert_eq!(bridge.pending_report_count().await, 0);
    }

    #[tokio::test]
    async fn test_non_object_report_is_dropped() {
        let (bridge, _rx) = bridge();

        bridge.save_pending_report("[1,2]").await;
        bridge.save_pending_report("5").await;
        bridge.save_pending_report(r#""just a string""#).await;

        assert_eq!(bridge.pending_reports().await, "[]");
        assert_eq!(bridge.pending_report_count().await, 0);
    }

    #[tokio::test]
    async fn test_session_sentinel() {
        let (bridge, _rx) = bridge();

        assert_eq!(bridge.user_session().await, "null");

        bridge.save_user_session(r#"{"user":"ranger-7"}"#).await;
        let session: Value = serde_json::from_str(&bridge.user_session().await).unwrap();
        assert_eq!(session, json!({"user":"ranger-7"}));

        bridge.clear_user_session().await;
        assert_eq!(bridge.user_session().await, "null");
    }

    #[tokio::test]
    async fn test_unparseable_session_is_dropped() {
        let (bridge, _rx) = bridge();

        bridge.save_user_session("][").await;

        assert_eq!(bridge.user_session().await, "null");
    }

    #[tokio::test]
    async fn test_non_object_session_is_dropped() {
        let (bridge, _rx) = bridge();

        bridge.save_user_session(r#"["not","an object"]"#).await;
        assert_eq!(bridge.user_session().await, "null");

        // An existing session survives a bad replacement attempt.
        bridge.save_user_session(r#"{"user":"ranger-7"}"#).await;
        bridge.save_user_session("42").await;
        let session: Value = serde_json::from_str(&bridge.user_session().await).unwrap();
        assert_eq!(session, json!({"user":"ranger-7"}));
    }

    #[tokio::test]
    async fn test_location_request_delivers_success_callback() {
        let (bridge, mut rx) = bridge();

        bridge.request_current_location();

        let message = rx.recv().await.unwrap();
        assert_eq!(message.callback_name(), Some("onLocationReceived"));
        match message {
            ContentMessage::LocationReceived(position) => {
                assert_eq!(position.latitude, 2.0);
                assert_eq!(position.longitude, 38.0);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_location_request_delivers_error_callback() {
        let (bridge, mut rx) = bridge_with(Arc::new(InstantFixProvider { permission: false }));

        bridge.request_current_location();

        let message = rx.recv().await.unwrap();
        assert_eq!(message.callback_name(), Some("onLocationError"));
        match message {
            ContentMessage::LocationFailed { code, message } => {
                assert_eq!(code, POSITION_UNAVAILABLE);
                assert_eq!(message, "Location permission not granted");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_connectivity_message_without_watcher() {
        let (bridge, mut rx) = bridge();
        bridge.save_pending_report(r#"{"a":1}"#).await;

        // Storage operations never produce sink traffic.
        assert!(rx.try_recv().is_err());
    }
}
