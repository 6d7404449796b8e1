//! Collaborators the dispatcher reports into.

use hexwire_core::error::{BoxError, HexwireError};

/// Error a presentation handler may return.
pub type HandlerError = BoxError;

/// Application state updates, one method per wired inbound tag.
pub trait PresentationSink: Send + Sync {
    fn on_connection_success(&self, player_id: &str) -> Result<(), HandlerError>;
    fn on_lobby_created(&self, lobby_id: &str) -> Result<(), HandlerError>;
    /// `board_json` is the compact JSON text of the envelope's `message`.
    fn on_board_received(&self, lobby_id: &str, board_json: &str) -> Result<(), HandlerError>;
}

/// Single surface for every dispatch-time and transport failure.
pub trait ErrorSink: Send + Sync {
    fn on_error(&self, err: HexwireError);
}

pub trait ClosedSink: Send + Sync {
    fn on_closed(&self, code: u16, reason: &str);
}
