//! Workspace facade crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates. Host applications can depend on `elewatch-shell` with the
//! `desktop-shims` feature enabled and get a shell runtime pre-wired with the
//! desktop preference store and network monitor, without wiring each crate
//! individually.

#[cfg(feature = "desktop-shims")]
pub use shell_runtime::{self, Shell, ShellConfig};
