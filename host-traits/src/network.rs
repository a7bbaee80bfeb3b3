//! Network Monitoring Abstraction
//!
//! Provides connectivity status so the shell can forward online/offline
//! transitions to hosted content.

use async_trait::async_trait;

use crate::error::Result;

/// Network connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    /// Connected to a network with internet capability
    Connected,
    /// Not connected to any network
    Disconnected,
    /// Connection status unknown or indeterminate
    Indeterminate,
}

/// Network monitor trait
///
/// # Platform Support
///
/// - **Android**: ConnectivityManager network callbacks
/// - **iOS**: Network framework path monitor
/// - **Desktop**: connectivity probing (see `host-desktop`)
#[async_trait]
pub trait NetworkMonitor: Send + Sync {
    /// Get the current connection status
    async fn status(&self) -> Result<NetworkStatus>;

    /// Check if currently connected to any network
    async fn is_connected(&self) -> bool {
        matches!(self.status().await, Ok(NetworkStatus::Connected))
    }

    /// Subscribe to connectivity changes
    ///
    /// Implementations should emit only on transitions, not on every probe.
    async fn subscribe_changes(&self) -> Result<Box<dyn ConnectivityStream>>;
}

/// Stream of connectivity status changes
#[async_trait]
pub trait ConnectivityStream: Send {
    /// Get the next status transition
    ///
    /// Returns `None` when the stream is closed.
    async fn next(&mut self) -> Option<NetworkStatus>;
}
