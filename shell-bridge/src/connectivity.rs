//! Forwarding connectivity transitions to hosted content.

use host_traits::network::{NetworkMonitor, NetworkStatus};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::sink::{ConnectivityEvent, ContentMessage, ContentSink};

/// Spawn a task forwarding network transitions into the hosted content
///
/// Each `Connected`/`Disconnected` transition becomes an `online`/`offline`
/// DOM event on the page; indeterminate probes are skipped. The events are
/// informational only — no queued-sync logic runs shell-side. The task ends
/// when the monitor closes its change stream.
pub fn watch_connectivity(
    monitor: Arc<dyn NetworkMonitor>,
    sink: Arc<dyn ContentSink>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut changes = match monitor.subscribe_changes().await {
            Ok(changes) => changes,
            Err(e) => {
                warn!(error = %e, "Connectivity watching unavailable");
                return;
            }
        };

        while let Some(status) = changes.next().await {
            let event = match status {
                NetworkStatus::Connected => ConnectivityEvent::Online,
                NetworkStatus::Disconnected => ConnectivityEvent::Offline,
                NetworkStatus::Indeterminate => continue,
            };

            debug!(event = event.dom_event(), "Forwarding connectivity event");
            sink.deliver(ContentMessage::Connectivity(event)).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use host_traits::error::Result;
    use host_traits::network::ConnectivityStream;
    use tokio::sync::mpsc;

    struct ScriptedMonitor {
        transitions: std::sync::Mutex<Vec<NetworkStatus>>,
    }

    struct ScriptedStream {
        transitions: Vec<NetworkStatus>,
    }

    #[async_trait]
    impl ConnectivityStream for ScriptedStream {
        async fn next(&mut self) -> Option<NetworkStatus> {
            if self.transitions.is_empty() {
                None
            } else {
                Some(self.transitions.remove(0))
            }
        }
    }

    #[async_trait]
    impl NetworkMonitor for ScriptedMonitor {
        async fn status(&self) -> Result<NetworkStatus> {
            Ok(NetworkStatus::Indeterminate)
        }

        async fn subscribe_changes(&self) -> Result<Box<dyn ConnectivityStream>> {
            Ok(Box::new(ScriptedStream {
                transitions: self.transitions.lock().unwrap().drain(..).collect(),
            }))
        }
    }

    struct ChannelSink {
        tx: mpsc::UnboundedSender<ContentMessage>,
    }

    #[async_trait]
    impl ContentSink for ChannelSink {
        async fn deliver(&self, message: ContentMessage) {
            self.tx.send(message).ok();
        }
    }

    #[tokio::test]
    async fn test_transitions_are_forwarded_in_order() {
        let monitor = Arc::new(ScriptedMonitor {
            transitions: std::sync::Mutex::new(vec![
                NetworkStatus::Connected,
                NetworkStatus::Indeterminate,
                NetworkStatus::Disconnected,
            ]),
        });
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = watch_connectivity(monitor, Arc::new(ChannelSink { tx }));
        handle.await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(ContentMessage::Connectivity(ConnectivityEvent::Online))
        );
        assert_eq!(
            rx.recv().await,
            Some(ContentMessage::Connectivity(ConnectivityEvent::Offline))
        );
        assert_eq!(rx.recv().await, None);
    }
}
