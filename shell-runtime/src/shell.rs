//! Assembly of the shell from its configured capabilities.

use host_traits::storage::PreferenceStore;
use shell_bridge::{watch_connectivity, WebBridge};
use shell_location::LocationResolver;
use shell_store::ReportStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ShellConfig;
use crate::error::{Error, Result};

/// A fully wired shell core
///
/// Owns the report store, the location resolver, and the web bridge, plus
/// the connectivity watcher when a network monitor was configured. The host
/// platform exposes [`Shell::bridge`] operations to its embedded browser
/// surface.
pub struct Shell {
    bridge: Arc<WebBridge>,
    store: Arc<ReportStore>,
    connectivity: Option<JoinHandle<()>>,
}

impl Shell {
    /// Wire the shell from a validated configuration
    pub async fn new(config: ShellConfig) -> Result<Self> {
        let prefs: Arc<dyn PreferenceStore> =
            match (config.preference_store, config.database_path) {
                (Some(store), _) => store,
                #[cfg(feature = "desktop-shims")]
                (None, Some(path)) => {
                    Arc::new(host_desktop::SqlitePreferenceStore::new(path).await?)
                }
                (None, _) => {
                    return Err(Error::Config(
                        "no preference store available".to_string(),
                    ))
                }
            };

        let store = Arc::new(ReportStore::new(prefs));
        let resolver = Arc::new(LocationResolver::with_policy(
            config.location_provider,
            config.clock,
            config.resolve_policy,
        ));
        let bridge = Arc::new(WebBridge::new(
            store.clone(),
            resolver,
            config.content_sink.clone(),
        ));

        let connectivity = config
            .network_monitor
            .map(|monitor| watch_connectivity(monitor, config.content_sink));

        debug!(
            connectivity = connectivity.is_some(),
            "Shell assembled"
        );

        Ok(Self {
            bridge,
            store,
            connectivity,
        })
    }

    /// The operation surface to expose to hosted content
    pub fn bridge(&self) -> Arc<WebBridge> {
        self.bridge.clone()
    }

    /// Direct store access for host-side maintenance (e.g. wiping on logout)
    pub fn store(&self) -> Arc<ReportStore> {
        self.store.clone()
    }

    /// Stop background work; bridge operations already in flight finish
    pub fn shutdown(mut self) {
        if let Some(handle) = self.connectivity.take() {
            handle.abort();
        }
    }
}
