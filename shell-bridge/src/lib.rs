//! # Web Bridge
//!
//! The request/callback surface between hosted web content and local device
//! services.
//!
//! ## Overview
//!
//! Control flows one way: hosted content invokes a [`WebBridge`] operation;
//! the operation touches the report store or the location resolver; results
//! come back either as the operation's return value or, for location
//! requests, as a later [`ContentMessage`] delivered through the page's
//! [`ContentSink`].
//!
//! All structured payloads cross as JSON strings. No failure inside this
//! layer ever terminates the hosted content: every path ends in a normal
//! return value, a safe default, or an asynchronous error callback.

mod bridge;
mod connectivity;
mod sink;

pub use bridge::WebBridge;
pub use connectivity::watch_connectivity;
pub use sink::{ConnectivityEvent, ContentMessage, ContentSink, POSITION_UNAVAILABLE};
