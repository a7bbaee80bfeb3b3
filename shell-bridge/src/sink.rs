//! Delivery surface into the hosted content's execution context.

use async_trait::async_trait;
use host_traits::location::Position;
use serde_json::json;

/// Geolocation error code delivered to hosted content
///
/// The page-side contract distinguishes failure causes by message only and
/// always carries the POSITION_UNAVAILABLE code.
pub const POSITION_UNAVAILABLE: u8 = 2;

/// Connectivity transition forwarded to hosted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

impl ConnectivityEvent {
    /// DOM event name dispatched on the hosted page
    pub fn dom_event(&self) -> &'static str {
        match self {
            ConnectivityEvent::Online => "online",
            ConnectivityEvent::Offline => "offline",
        }
    }
}

/// A message delivered asynchronously into the hosted content
///
/// Location results answer a prior `request_current_location` call;
/// connectivity events are unsolicited and informational only.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentMessage {
    LocationReceived(Position),
    LocationFailed { code: u8, message: String },
    Connectivity(ConnectivityEvent),
}

impl ContentMessage {
    /// Name of the page-side callback this message targets, if any
    ///
    /// Connectivity transitions are DOM events rather than callbacks; see
    /// [`ConnectivityEvent::dom_event`].
    pub fn callback_name(&self) -> Option<&'static str> {
        match self {
            ContentMessage::LocationReceived(_) => Some("onLocationReceived"),
            ContentMessage::LocationFailed { .. } => Some("onLocationError"),
            ContentMessage::Connectivity(_) => None,
        }
    }

    /// JSON argument passed to the page-side callback
    pub fn payload_json(&self) -> Option<String> {
        match self {
            ContentMessage::LocationReceived(position) => Some(
                json!({
                    "latitude": position.latitude,
                    "longitude": position.longitude,
                    "accuracy": position.accuracy,
                    "timestamp": position.timestamp,
                })
                .to_string(),
            ),
            ContentMessage::LocationFailed { code, message } => {
                Some(json!({ "code": code, "message": message }).to_string())
            }
            ContentMessage::Connectivity(_) => None,
        }
    }
}

/// Execution context of the hosted content
///
/// Implementations marshal delivery onto the page's main execution context
/// (e.g. evaluate a script on the UI thread of an embedded browser surface).
/// Delivery must never surface an error back into the shell; a sink that
/// cannot deliver logs and drops.
#[async_trait]
pub trait ContentSink: Send + Sync {
    async fn deliver(&self, message: ContentMessage);
}
