//! # Desktop Host Implementations
//!
//! Default implementations of host capability traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides desktop-ready implementations of the shell's storage
//! and network capabilities:
//! - `PreferenceStore` using a SQLite-backed key-value store
//! - `NetworkMonitor` using TCP connectivity probing
//!
//! There is no desktop `LocationProvider`: desktops have no standard
//! positioning stack, so hosts either inject their own adapter or leave the
//! capability absent and let location requests fail with "service not
//! available".
//!
//! ## Usage
//!
//! ```ignore
//! use host_desktop::{DesktopNetworkMonitor, SqlitePreferenceStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let prefs = SqlitePreferenceStore::new("shell.db".into()).await.unwrap();
//!     let network = DesktopNetworkMonitor::new();
//!
//!     // Inject into ShellConfig
//! }
//! ```

mod network;
mod preferences;

pub use network::DesktopNetworkMonitor;
pub use preferences::SqlitePreferenceStore;
