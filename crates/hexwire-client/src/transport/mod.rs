//! Transport layer (WebSocket client).
//!
//! `Connection` owns the socket; it reports lifecycle events to a
//! `ConnectionListener` and never interprets payloads.

pub mod connection;

use hexwire_core::error::HexwireError;

pub use connection::Connection;

/// Observable connection phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected.
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Frames can be sent.
    Open,
    /// A close frame was sent or received.
    Closing,
    /// Session over. Failures end here with code 1006.
    Closed { code: u16, reason: String },
}

/// Receives session lifecycle events. Called from the session task, so
/// implementations must not assume any particular thread.
pub trait ConnectionListener: Send + Sync {
    fn on_open(&self);
    fn on_message(&self, text: &str);
    /// The server sent a close frame.
    fn on_closing(&self, code: u16, reason: &str);
    /// The close handshake completed.
    fn on_closed(&self, code: u16, reason: &str);
    fn on_failure(&self, err: HexwireError);
}

/// The send side of a connection, as seen by outbound senders.
pub trait OutboundChannel: Send + Sync {
    fn is_connected(&self) -> bool;
    /// Returns false (never errors) when the frame could not be queued.
    fn send(&self, text: String) -> bool;
}
