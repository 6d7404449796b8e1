//! hexwire client library entry.
//!
//! This crate wires the WebSocket transport, the inbound dispatcher, the
//! outbound action senders, and the optional reconnect supervisor into one
//! client stack. It is consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod outbound;
pub mod session;
pub mod supervisor;
pub mod transport;
