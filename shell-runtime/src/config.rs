//! # Shell Configuration
//!
//! Builder for the capabilities and thresholds the shell runs with.
//!
//! ## Required Dependencies
//!
//! - `LocationProvider` - positioning stack of the host platform
//! - `ContentSink` - execution context of the hosted content
//! - `PreferenceStore` - durable storage; with the `desktop-shims` feature a
//!   `database_path` is enough and the SQLite store is injected automatically
//!
//! ## Optional Dependencies
//!
//! - `NetworkMonitor` - enables online/offline forwarding (desktop default
//!   injected under `desktop-shims`)
//! - `Clock` - defaults to the system clock
//! - `start_url` - startup URL carried for the host's browser surface
//!
//! The builder enforces fail-fast validation so a missing capability is an
//! actionable construction error rather than a runtime surprise.
//!
//! ## Usage
//!
//! ```ignore
//! use shell_runtime::ShellConfig;
//! use std::sync::Arc;
//!
//! let config = ShellConfig::builder()
//!     .database_path("/data/shell/offline.db")
//!     .location_provider(Arc::new(MyLocationAdapter))
//!     .content_sink(Arc::new(MyWebViewSink))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use host_traits::{
    location::LocationProvider, network::NetworkMonitor, storage::PreferenceStore, time::Clock,
    time::SystemClock,
};
use shell_bridge::ContentSink;
use shell_location::ResolvePolicy;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Configuration for assembling a [`Shell`](crate::Shell)
#[derive(Clone)]
pub struct ShellConfig {
    /// Durable key-value storage; absent only when `database_path` is set
    /// under `desktop-shims`
    pub preference_store: Option<Arc<dyn PreferenceStore>>,

    /// Path for the desktop SQLite preference store
    pub database_path: Option<PathBuf>,

    /// Positioning stack (required)
    pub location_provider: Arc<dyn LocationProvider>,

    /// Hosted content's execution context (required)
    pub content_sink: Arc<dyn ContentSink>,

    /// Connectivity monitor; when absent, no online/offline events are sent
    pub network_monitor: Option<Arc<dyn NetworkMonitor>>,

    /// Time source for freshness and timeout checks
    pub clock: Arc<dyn Clock>,

    /// Thresholds for location resolution
    pub resolve_policy: ResolvePolicy,

    /// URL the host should load into its browser surface on startup
    ///
    /// Carried for the host; the shell core never loads content itself.
    pub start_url: Option<String>,
}

impl std::fmt::Debug for ShellConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellConfig")
            .field(
                "preference_store",
                &self.preference_store.as_ref().map(|_| "PreferenceStore { ... }"),
            )
            .field("database_path", &self.database_path)
            .field("location_provider", &"LocationProvider { ... }")
            .field("content_sink", &"ContentSink { ... }")
            .field(
                "network_monitor",
                &self.network_monitor.as_ref().map(|_| "NetworkMonitor { ... }"),
            )
            .field("resolve_policy", &self.resolve_policy)
            .field("start_url", &self.start_url)
            .finish()
    }
}

impl ShellConfig {
    pub fn builder() -> ShellConfigBuilder {
        ShellConfigBuilder::default()
    }
}

/// Builder for [`ShellConfig`]
#[derive(Default)]
pub struct ShellConfigBuilder {
    preference_store: Option<Arc<dyn PreferenceStore>>,
    database_path: Option<PathBuf>,
    location_provider: Option<Arc<dyn LocationProvider>>,
    content_sink: Option<Arc<dyn ContentSink>>,
    network_monitor: Option<Arc<dyn NetworkMonitor>>,
    clock: Option<Arc<dyn Clock>>,
    resolve_policy: Option<ResolvePolicy>,
    start_url: Option<String>,
}

impl ShellConfigBuilder {
    pub fn preference_store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.preference_store = Some(store);
        self
    }

    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    pub fn location_provider(mut self, provider: Arc<dyn LocationProvider>) -> Self {
        self.location_provider = Some(provider);
        self
    }

    pub fn content_sink(mut self, sink: Arc<dyn ContentSink>) -> Self {
        self.content_sink = Some(sink);
        self
    }

    pub fn network_monitor(mut self, monitor: Arc<dyn NetworkMonitor>) -> Self {
        self.network_monitor = Some(monitor);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn resolve_policy(mut self, policy: ResolvePolicy) -> Self {
        self.resolve_policy = Some(policy);
        self
    }

    pub fn start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = Some(url.into());
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ShellConfig> {
        let location_provider =
            self.location_provider
                .ok_or_else(|| Error::CapabilityMissing {
                    capability: "LocationProvider".to_string(),
                    message: "No positioning stack provided. \
                              Mobile: inject the platform-native adapter. \
                              Desktop: there is no default shim; inject one or \
                              expect location requests to fail."
                        .to_string(),
                })?;

        let content_sink = self.content_sink.ok_or_else(|| Error::CapabilityMissing {
            capability: "ContentSink".to_string(),
            message: "No hosted-content execution context provided. \
                      Inject the sink that marshals callbacks onto the page."
                .to_string(),
        })?;

        if self.preference_store.is_none() && self.database_path.is_none() {
            return Err(Error::CapabilityMissing {
                capability: "PreferenceStore".to_string(),
                message: "No durable storage provided. \
                          Mobile: inject a platform-native store. \
                          Desktop: set database_path with the desktop-shims \
                          feature enabled."
                    .to_string(),
            });
        }

        #[cfg(not(feature = "desktop-shims"))]
        if self.preference_store.is_none() {
            return Err(Error::CapabilityMissing {
                capability: "PreferenceStore".to_string(),
                message: "database_path requires the desktop-shims feature; \
                          inject a PreferenceStore directly."
                    .to_string(),
            });
        }

        #[cfg(feature = "desktop-shims")]
        let network_monitor = self
            .network_monitor
            .or_else(|| Some(Arc::new(host_desktop::DesktopNetworkMonitor::new()) as _));
        #[cfg(not(feature = "desktop-shims"))]
        let network_monitor = self.network_monitor;

        Ok(ShellConfig {
            preference_store: self.preference_store,
            database_path: self.database_path,
            location_provider,
            content_sink,
            network_monitor,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            resolve_policy: self.resolve_policy.unwrap_or_default(),
            start_url: self.start_url,
        })
    }
}
