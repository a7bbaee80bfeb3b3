//! Network Monitoring Implementation

use async_trait::async_trait;
use host_traits::{
    error::Result,
    network::{ConnectivityStream, NetworkMonitor, NetworkStatus},
};
use tracing::debug;

/// Desktop network monitor implementation
///
/// Provides basic connectivity detection by probing a well-known endpoint.
///
/// Note: Platform-specific implementations (Linux netlink, macOS
/// SystemConfiguration, Windows WinAPI) would be more robust but require
/// additional dependencies.
pub struct DesktopNetworkMonitor {
    probe_addr: String,
}

impl DesktopNetworkMonitor {
    /// Create a new network monitor
    pub fn new() -> Self {
        Self {
            probe_addr: "8.8.8.8:53".to_string(),
        }
    }

    /// Create a monitor probing a custom endpoint (for testing)
    pub fn with_probe_addr(probe_addr: impl Into<String>) -> Self {
        Self {
            probe_addr: probe_addr.into(),
        }
    }

    /// Check connectivity by attempting a TCP connection
    async fn check_connectivity(&self) -> NetworkStatus {
        match tokio::time::timeout(
            std::time::Duration::from_secs(5),
            tokio::net::TcpStream::connect(&self.probe_addr),
        )
        .await
        {
            Ok(Ok(_)) => NetworkStatus::Connected,
            Ok(Err(_)) => NetworkStatus::Disconnected,
            Err(_) => NetworkStatus::Disconnected,
        }
    }
}

impl Default for DesktopNetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkMonitor for DesktopNetworkMonitor {
    async fn status(&self) -> Result<NetworkStatus> {
        let status = self.check_connectivity().await;
        debug!(status = ?status, "Probed network status");
        Ok(status)
    }

    async fn subscribe_changes(&self) -> Result<Box<dyn ConnectivityStream>> {
        // Poll-based stream; a production implementation would use
        // platform-specific APIs to watch for changes.
        Ok(Box::new(PollingConnectivityStream {
            monitor: Self::with_probe_addr(self.probe_addr.clone()),
            last_status: None,
        }))
    }
}

/// Connectivity stream that polls for transitions
struct PollingConnectivityStream {
    monitor: DesktopNetworkMonitor,
    last_status: Option<NetworkStatus>,
}

#[async_trait]
impl ConnectivityStream for PollingConnectivityStream {
    async fn next(&mut self) -> Option<NetworkStatus> {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;

            if let Ok(status) = self.monitor.status().await {
                // Only emit on transitions
                if self.last_status != Some(status) {
                    self.last_status = Some(status);
                    return Some(status);
                }
            }
        }
    }
}
