//! # Host Capability Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the shell core and platform-specific
//! implementations. Each trait represents a capability the shell requires but
//! that must be implemented differently per platform (Android, iOS, desktop).
//!
//! ## Traits
//!
//! - [`PreferenceStore`](storage::PreferenceStore) - Durable key-value storage
//!   backing the offline report queue and session slot
//! - [`LocationProvider`](location::LocationProvider) - Last-known fixes and
//!   live position update subscriptions
//! - [`NetworkMonitor`](network::NetworkMonitor) - Connectivity detection for
//!   online/offline event forwarding
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Platform Requirements
//!
//! Each supported platform must ship concrete adapters for every required
//! trait. The desktop shims in `host-desktop` cover `PreferenceStore` and
//! `NetworkMonitor`; mobile hosts inject native adapters for everything,
//! including `LocationProvider` (which has no desktop default).
//!
//! ## Fail-Fast Strategy
//!
//! The shell fails fast with descriptive errors when a required capability is
//! missing — see `shell-runtime::ShellConfig`.
//!
//! ## Error Handling
//!
//! All capability traits use [`HostError`](error::HostError). Platform
//! implementations should convert platform-specific errors to `HostError` and
//! provide actionable messages.
//!
//! ## Thread Safety
//!
//! All capability traits require `Send + Sync` bounds so implementations can
//! be shared freely across async tasks.

pub mod error;
pub mod location;
pub mod network;
pub mod storage;
pub mod time;

pub use error::HostError;

// Re-export commonly used types
pub use location::{LocationProvider, LocationUpdates, Position, SourceKind, UpdateParams};
pub use network::{ConnectivityStream, NetworkMonitor, NetworkStatus};
pub use storage::{MemoryPreferenceStore, PreferenceStore};
pub use time::{Clock, SystemClock};
