//! Application wiring for the hexwire client.
//!
//! Builds the session holder, connection, dispatcher, and action sender once
//! and hands out shared references. No globals: everything that needs the
//! connection or the session receives it here.

use std::sync::Arc;

use tracing::{error, info};

use hexwire_core::error::HexwireError;

use crate::config::ClientConfig;
use crate::dispatch::{ClosedSink, Dispatcher, ErrorSink, HandlerError, PresentationSink};
use crate::outbound::ActionSender;
use crate::session::SessionHolder;
use crate::supervisor::Reconnector;
use crate::transport::{Connection, ConnectionListener};

/// Headless sink: records the player id and logs every event.
pub struct TracingSink {
    session: Arc<SessionHolder>,
}

impl TracingSink {
    pub fn new(session: Arc<SessionHolder>) -> Self {
        Self { session }
    }
}

impl PresentationSink for TracingSink {
    fn on_connection_success(&self, player_id: &str) -> Result<(), HandlerError> {
        self.session.set_player_id(player_id);
        info!(player_id = %player_id, "connection accepted");
        Ok(())
    }

    fn on_lobby_created(&self, lobby_id: &str) -> Result<(), HandlerError> {
        info!(lobby_id = %lobby_id, "lobby created");
        Ok(())
    }

    fn on_board_received(&self, lobby_id: &str, board_json: &str) -> Result<(), HandlerError> {
        info!(lobby_id = %lobby_id, bytes = board_json.len(), "board received");
        Ok(())
    }
}

impl ErrorSink for TracingSink {
    fn on_error(&self, err: HexwireError) {
        error!(code = err.code().as_str(), error = %err, "client error");
    }
}

impl ClosedSink for TracingSink {
    fn on_closed(&self, code: u16, reason: &str) {
        self.session.clear();
        info!(code, reason = %reason, "connection closed");
    }
}

#[derive(Clone)]
pub struct ClientApp {
    cfg: Arc<ClientConfig>,
    session: Arc<SessionHolder>,
    connection: Arc<Connection>,
    dispatcher: Arc<Dispatcher>,
    actions: ActionSender,
    supervisor: Option<Arc<Reconnector>>,
}

impl ClientApp {
    pub fn new(cfg: ClientConfig) -> Self {
        let session = Arc::new(SessionHolder::new());
        let sink = Arc::new(TracingSink::new(Arc::clone(&session)));
        Self::with_sinks(cfg, session, sink.clone(), sink.clone(), sink)
    }

    /// Wire the client around caller-provided sinks.
    pub fn with_sinks(
        cfg: ClientConfig,
        session: Arc<SessionHolder>,
        presentation: Arc<dyn PresentationSink>,
        errors: Arc<dyn ErrorSink>,
        closed: Arc<dyn ClosedSink>,
    ) -> Self {
        let connection = Arc::new(Connection::new(&cfg.server));
        let dispatcher = Arc::new(Dispatcher::new(presentation, errors, closed));
        let actions = ActionSender::new(connection.clone(), session.clone());
        let supervisor = cfg.reconnect.enabled.then(|| {
            let listener: Arc<dyn ConnectionListener> = dispatcher.clone();
            Reconnector::new(Arc::clone(&connection), listener, &cfg.reconnect)
        });

        Self {
            cfg: Arc::new(cfg),
            session,
            connection,
            dispatcher,
            actions,
            supervisor,
        }
    }

    pub fn cfg(&self) -> &ClientConfig {
        &self.cfg
    }

    pub fn session(&self) -> Arc<SessionHolder> {
        Arc::clone(&self.session)
    }

    pub fn connection(&self) -> Arc<Connection> {
        Arc::clone(&self.connection)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn actions(&self) -> &ActionSender {
        &self.actions
    }

    /// Open the session, supervised when `reconnect.enabled` is set.
    pub fn start(&self) {
        info!(
            url = %self.connection.url(),
            reconnect = self.cfg.reconnect.enabled,
            "hexwire client starting"
        );
        match &self.supervisor {
            Some(supervisor) => supervisor.start(),
            None => self.connection.connect(self.dispatcher.clone()),
        }
    }

    /// Graceful close with the configured close code; stops reconnecting.
    pub fn shutdown(&self) {
        if let Some(supervisor) = &self.supervisor {
            supervisor.stop();
        }
        self.connection.close(self.cfg.server.close_code, "client shutdown");
    }
}
