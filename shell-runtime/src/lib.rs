//! # Shell Runtime
//!
//! Assembles the shell core from host-provided capabilities.
//!
//! ## Overview
//!
//! The host platform provides concrete capability implementations (storage,
//! location, connectivity, the hosted content's execution context); this
//! crate validates them fail-fast through [`ShellConfig`], wires the report
//! store, location resolver, and web bridge together as a [`Shell`], and
//! offers `tracing` initialization via [`logging`].
//!
//! ## Feature Flags
//!
//! - `desktop-shims`: inject `host-desktop` defaults for the preference
//!   store (SQLite at `database_path`) and network monitor when the host
//!   does not provide its own.

pub mod config;
pub mod error;
pub mod logging;
mod shell;

pub use config::{ShellConfig, ShellConfigBuilder};
pub use error::Error;
pub use shell::Shell;
