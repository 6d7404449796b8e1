//! Inbound frame routing.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use hexwire_core::error::{HexwireError, Result};
use hexwire_core::protocol::{decode, Inbound, MessageType};

use crate::dispatch::sinks::{ClosedSink, ErrorSink, HandlerError, PresentationSink};
use crate::transport::ConnectionListener;

/// Routes each inbound text frame to at most one handler or one error report.
///
/// Unknown tags are dropped silently here; the codec reports them as
/// `UnknownType` and this is the layer that decides to tolerate them.
/// Handlers run synchronously inside `dispatch`.
pub struct Dispatcher {
    presentation: Arc<dyn PresentationSink>,
    errors: Arc<dyn ErrorSink>,
    closed: Arc<dyn ClosedSink>,
}

impl Dispatcher {
    pub fn new(
        presentation: Arc<dyn PresentationSink>,
        errors: Arc<dyn ErrorSink>,
        closed: Arc<dyn ClosedSink>,
    ) -> Self {
        Self {
            presentation,
            errors,
            closed,
        }
    }

    /// Handle one inbound frame. Never panics or returns an error; every
    /// failure goes to the error sink exactly once.
    pub fn dispatch(&self, text: &str) {
        if let Err(e) = self.route(text) {
            debug!(code = e.code().as_str(), error = %e, "inbound frame rejected");
            self.errors.on_error(e);
        }
    }

    fn route(&self, text: &str) -> Result<()> {
        let env = match decode(text) {
            Ok(env) => env,
            Err(HexwireError::UnknownType(tag)) => {
                debug!(tag = %tag, "ignoring unknown message type");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let inbound = Inbound::from_envelope(env)?;
        self.invoke(inbound)
    }

    fn invoke(&self, inbound: Inbound) -> Result<()> {
        match inbound {
            Inbound::ConnectionSuccessful { player_id } => {
                guarded(MessageType::ConnectionSuccessful, || {
                    self.presentation.on_connection_success(&player_id)
                })
            }
            Inbound::LobbyCreated { lobby_id } => guarded(MessageType::LobbyCreated, || {
                self.presentation.on_lobby_created(&lobby_id)
            }),
            Inbound::BoardUpdate {
                msg_type,
                lobby_id,
                board,
            } => {
                let board_json = serde_json::to_string(&board)
                    .map_err(|e| HexwireError::Internal(format!("board encode failed: {e}")))?;
                guarded(msg_type, || {
                    self.presentation.on_board_received(&lobby_id, &board_json)
                })
            }
            Inbound::ServerError { message } => {
                let detail = message.map(|m| m.to_string()).unwrap_or_default();
                warn!(detail = %detail, "server reported an error");
                Ok(())
            }
            Inbound::Unwired(msg_type) => {
                debug!(msg_type = %msg_type, "no handler wired");
                Ok(())
            }
        }
    }
}

/// Run a handler, turning both returned errors and panics into `HandlerFailure`.
fn guarded<F>(msg_type: MessageType, f: F) -> Result<()>
where
    F: FnOnce() -> std::result::Result<(), HandlerError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(HexwireError::HandlerFailure {
            tag: msg_type.as_str(),
            source,
        }),
        Err(payload) => Err(HexwireError::HandlerFailure {
            tag: msg_type.as_str(),
            source: panic_message(payload.as_ref()).into(),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("handler panicked: {s}")
    } else {
        "handler panicked".to_string()
    }
}

impl ConnectionListener for Dispatcher {
    fn on_open(&self) {
        info!("connection open");
    }

    fn on_message(&self, text: &str) {
        self.dispatch(text);
    }

    fn on_closing(&self, code: u16, reason: &str) {
        info!(code, reason = %reason, "connection closing");
    }

    fn on_closed(&self, code: u16, reason: &str) {
        self.closed.on_closed(code, reason);
    }

    fn on_failure(&self, err: HexwireError) {
        self.errors.on_error(err);
    }
}
