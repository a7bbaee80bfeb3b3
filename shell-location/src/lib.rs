//! # Location Resolver
//!
//! Best-effort current-position resolution over a [`LocationProvider`], with
//! a two-tier strategy:
//!
//! 1. **Fast path** — use a sufficiently fresh last-known fix when one exists,
//!    preferring the high-accuracy source and falling back to the coarse
//!    source only when the high-accuracy fix is missing entirely.
//! 2. **Live path** — otherwise subscribe to updates from every enabled
//!    source and deliver the first one, bounded by a hard timeout. Whichever
//!    of "first update" and "timer" fires first wins; the subscription is
//!    torn down exactly once by dropping the stream.
//!
//! Every request runs fresh through the phases below; nothing persists
//! across requests, and no retry is attempted — callers re-invoke to retry.

use host_traits::{
    location::{LocationProvider, Position, SourceKind, UpdateParams},
    time::Clock,
    HostError,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// How a location request failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission not granted")]
    PermissionDenied,

    #[error("Location service not available")]
    ProviderUnavailable,

    #[error("Location request timed out")]
    TimedOut,

    #[error("Error getting location: {0}")]
    Delivery(String),
}

impl From<HostError> for LocationError {
    fn from(e: HostError) -> Self {
        match e {
            HostError::NotAvailable(_) => LocationError::ProviderUnavailable,
            other => LocationError::Delivery(other.to_string()),
        }
    }
}

/// Phase of a single location request
///
/// Requests move strictly forward: fast path, then (only if no fresh fix was
/// found) a live subscription, then completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    AwaitingFastPath,
    Subscribed,
    Completed,
}

/// Tunable thresholds for a resolution request
#[derive(Debug, Clone, Copy)]
pub struct ResolvePolicy {
    /// Maximum age for a last-known fix to be delivered directly
    pub freshness: Duration,
    /// Budget for the live path, from subscription start
    pub timeout: Duration,
    /// Rate limits applied to the live subscription
    pub update_params: UpdateParams,
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self {
            freshness: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
            update_params: UpdateParams::default(),
        }
    }
}

/// Resolves a best-effort current position on demand
pub struct LocationResolver {
    provider: Arc<dyn LocationProvider>,
    clock: Arc<dyn Clock>,
    policy: ResolvePolicy,
}

impl LocationResolver {
    pub fn new(provider: Arc<dyn LocationProvider>, clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(provider, clock, ResolvePolicy::default())
    }

    pub fn with_policy(
        provider: Arc<dyn LocationProvider>,
        clock: Arc<dyn Clock>,
        policy: ResolvePolicy,
    ) -> Self {
        Self {
            provider,
            clock,
            policy,
        }
    }

    /// Resolve the current position
    ///
    /// Errors are returned, never panicked or thrown across the bridge; the
    /// caller decides how to surface them.
    pub async fn resolve(&self) -> Result<Position, LocationError> {
        let mut phase = RequestPhase::AwaitingFastPath;
        debug!(phase = ?phase, "Starting location request");

        if !self.provider.permission_granted().await {
            return Err(LocationError::PermissionDenied);
        }

        if let Some(position) = self.fast_path().await? {
            phase = RequestPhase::Completed;
            debug!(phase = ?phase, "Delivered last-known fix");
            return Ok(position);
        }

        phase = RequestPhase::Subscribed;
        debug!(phase = ?phase, "No fresh last-known fix; subscribing for updates");

        let result = self.live_path().await;

        phase = RequestPhase::Completed;
        debug!(phase = ?phase, ok = result.is_ok(), "Location request finished");
        result
    }

    fn is_fresh(&self, position: &Position, now_millis: i64) -> bool {
        let age = now_millis.saturating_sub(position.timestamp);
        age < self.policy.freshness.as_millis() as i64
    }

    /// Try the last-known fixes; `Ok(None)` means fall through to live updates
    async fn fast_path(&self) -> Result<Option<Position>, LocationError> {
        let now = self.clock.unix_timestamp_millis();

        let mut candidate = None;
        if self.provider.is_enabled(SourceKind::Satellite).await? {
            candidate = self.provider.last_known(SourceKind::Satellite).await?;
        }

        // Fall back to the coarse source, but only in place of a missing
        // high-accuracy fix, never a stale one.
        let satellite_usable = candidate
            .as_ref()
            .map(|p| self.is_fresh(p, now))
            .unwrap_or(false);
        if !satellite_usable && self.provider.is_enabled(SourceKind::Network).await? {
            if let Some(network_fix) = self.provider.last_known(SourceKind::Network).await? {
                if candidate.is_none() {
                    candidate = Some(network_fix);
                }
            }
        }

        match candidate {
            Some(position) if self.is_fresh(&position, now) => Ok(Some(position)),
            _ => Ok(None),
        }
    }

    /// Subscribe to every enabled source and wait for the first update
    async fn live_path(&self) -> Result<Position, LocationError> {
        let mut kinds = Vec::new();
        for kind in [SourceKind::Satellite, SourceKind::Network] {
            if self.provider.is_enabled(kind).await? {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            return Err(LocationError::ProviderUnavailable);
        }

        let mut updates = self
            .provider
            .subscribe(&kinds, self.policy.update_params)
            .await?;
        let started = self.clock.unix_timestamp_millis();

        let outcome = tokio::time::timeout(self.policy.timeout, updates.next()).await;

        // Either arm ends the request; dropping the stream unsubscribes and
        // makes any late platform update a no-op.
        drop(updates);

        match outcome {
            // Hard timer fired before any update
            Err(_) => Err(LocationError::TimedOut),
            // Source shut the subscription down (e.g. provider disabled)
            Ok(None) => Err(LocationError::ProviderUnavailable),
            Ok(Some(position)) => {
                // The update may have been queued past the budget; honor the
                // request-local elapsed check as well as the hard timer.
                let elapsed = self.clock.unix_timestamp_millis().saturating_sub(started);
                if elapsed > self.policy.timeout.as_millis() as i64 {
                    Err(LocationError::TimedOut)
                } else {
                    Ok(position)
                }
            }
        }
    }
}
