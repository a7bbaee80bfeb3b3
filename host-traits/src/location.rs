//! Geolocation Abstraction
//!
//! Provides access to the host's positioning sources: last-known fixes and
//! live update subscriptions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;

/// A single position fix
///
/// `timestamp` is the fix time in Unix epoch milliseconds, as reported by the
/// positioning source (not the time the fix was read).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated horizontal accuracy in meters
    pub accuracy: f64,
    pub timestamp: i64,
}

/// Kind of positioning source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// High-accuracy satellite positioning (GPS/GNSS)
    Satellite,
    /// Coarse, lower-power network positioning (cell/WiFi)
    Network,
}

/// Parameters for a live update subscription
///
/// Both thresholds reduce update frequency; the host may deliver fewer
/// updates than requested but should not deliver more.
#[derive(Debug, Clone, Copy)]
pub struct UpdateParams {
    /// Minimum time between updates
    pub min_interval: Duration,
    /// Minimum displacement between updates, in meters
    pub min_displacement_m: f64,
}

impl Default for UpdateParams {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(1),
            min_displacement_m: 10.0,
        }
    }
}

/// Positioning source trait
///
/// Abstracts the platform location stack:
/// - **Android**: LocationManager (GPS_PROVIDER / NETWORK_PROVIDER)
/// - **iOS**: CoreLocation
/// - **Desktop**: no default shim; hosts inject an adapter or location
///   requests fail with "service not available"
///
/// Implementations must deliver subscription updates off whatever thread the
/// platform uses and remain safe to share across async tasks.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the user has granted location permission to the shell
    async fn permission_granted(&self) -> bool;

    /// Whether a source kind is currently enabled on the device
    async fn is_enabled(&self, kind: SourceKind) -> Result<bool>;

    /// The most recent fix the source has cached, if any
    ///
    /// May be arbitrarily old; callers decide freshness.
    async fn last_known(&self, kind: SourceKind) -> Result<Option<Position>>;

    /// Subscribe to live updates from the given source kinds
    ///
    /// Updates from all subscribed kinds are merged into one stream.
    /// Dropping the returned stream unsubscribes; dropping it more than once
    /// is impossible by construction, and implementations must tolerate the
    /// platform delivering an update after teardown began.
    async fn subscribe(
        &self,
        kinds: &[SourceKind],
        params: UpdateParams,
    ) -> Result<Box<dyn LocationUpdates>>;
}

/// Stream of live position updates
#[async_trait]
pub trait LocationUpdates: Send {
    /// Get the next position update
    ///
    /// Returns `None` when the underlying source shut the subscription down
    /// (e.g., the user disabled the provider).
    async fn next(&mut self) -> Option<Position>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_json_shape() {
        let position = Position {
            latitude: -1.2921,
            longitude: 36.8219,
            accuracy: 12.5,
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&position).unwrap();
        assert_eq!(json["latitude"], -1.2921);
        assert_eq!(json["longitude"], 36.8219);
        assert_eq!(json["accuracy"], 12.5);
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_default_update_params() {
        let params = UpdateParams::default();
        assert_eq!(params.min_interval, Duration::from_secs(1));
        assert_eq!(params.min_displacement_m, 10.0);
    }
}
