//! The single WebSocket session to the game server.
//!
//! `Connection` is cheap to share (`Arc<Connection>`) and never blocks:
//! - `connect` spawns a session task on the ambient tokio runtime.
//! - `send` enqueues onto a bounded queue drained by that task (`try_send`).
//! - `close` hands a close request to the task through a oneshot.
//!
//! Each `connect` bumps a generation counter. A session task whose generation
//! is no longer current has been replaced: it stops without emitting events.
//! Dropping the `Connection` abandons its session the same way.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info, warn};

use hexwire_core::error::HexwireError;

use crate::config::ServerSection;
use crate::transport::{ConnectionListener, ConnectionState, OutboundChannel};

/// Close code reported when the session ended without a close handshake.
pub const CLOSE_ABNORMAL: u16 = 1006;
/// Close code reported when the peer's close frame carried no status.
pub const CLOSE_NO_STATUS: u16 = 1005;

#[derive(Debug)]
struct CloseRequest {
    code: u16,
    reason: String,
}

struct SessionHandle {
    tx: mpsc::Sender<String>,
    close_tx: Option<oneshot::Sender<CloseRequest>>,
}

struct Inner {
    state: ConnectionState,
    generation: u64,
    session: Option<SessionHandle>,
}

struct Shared {
    inner: Mutex<Inner>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    /// Handshake done. Returns false if this session was replaced meanwhile.
    fn mark_open(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        if inner.state == ConnectionState::Connecting {
            inner.state = ConnectionState::Open;
        }
        true
    }

    fn mark_closing(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        inner.state = ConnectionState::Closing;
        true
    }

    /// Terminal transition. Returns false if this session was replaced.
    fn finish(&self, generation: u64, code: u16, reason: &str) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        inner.state = ConnectionState::Closed {
            code,
            reason: reason.to_string(),
        };
        inner.session = None;
        true
    }
}

/// One outbound session to a fixed server URL.
pub struct Connection {
    url: String,
    queue_capacity: usize,
    shared: Arc<Shared>,
}

impl Connection {
    pub fn new(server: &ServerSection) -> Self {
        Self {
            url: server.url.clone(),
            queue_capacity: server.outbound_queue.max(1),
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state: ConnectionState::Disconnected,
                    generation: 0,
                    session: None,
                }),
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.lock().state.clone()
    }

    /// Open a new session, replacing (and abandoning) any previous one.
    ///
    /// Must be called from within a tokio runtime; otherwise the listener
    /// receives `on_failure` and nothing is spawned.
    pub fn connect(&self, listener: Arc<dyn ConnectionListener>) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(url = %self.url, "connect called outside a tokio runtime");
                let mut inner = self.shared.lock();
                inner.state = ConnectionState::Closed {
                    code: CLOSE_ABNORMAL,
                    reason: "no tokio runtime".into(),
                };
                drop(inner);
                listener.on_failure(HexwireError::transport(e));
                return;
            }
        };

        let (tx, rx) = mpsc::channel::<String>(self.queue_capacity);
        let (close_tx, close_rx) = oneshot::channel::<CloseRequest>();

        let generation = {
            let mut inner = self.shared.lock();
            inner.generation += 1;
            if inner.session.is_some() {
                debug!(
                    url = %self.url,
                    generation = inner.generation,
                    "replacing previous session"
                );
            }
            inner.state = ConnectionState::Connecting;
            // Dropping the old handle closes its queue; the old task exits quietly.
            inner.session = Some(SessionHandle {
                tx,
                close_tx: Some(close_tx),
            });
            inner.generation
        };

        let task = SessionTask {
            url: self.url.clone(),
            generation,
            shared: Arc::clone(&self.shared),
            listener,
        };
        runtime.spawn(task.run(rx, close_rx));
    }

    /// Request a graceful close. No-op unless connecting or open.
    pub fn close(&self, code: u16, reason: &str) {
        let mut inner = self.shared.lock();
        if !matches!(
            inner.state,
            ConnectionState::Connecting | ConnectionState::Open
        ) {
            return;
        }
        let Some(close_tx) = inner.session.as_mut().and_then(|s| s.close_tx.take()) else {
            return;
        };
        inner.state = ConnectionState::Closing;
        drop(inner);

        let _ = close_tx.send(CloseRequest {
            code,
            reason: reason.to_string(),
        });
    }
}

impl Drop for Connection {
    /// Abandon the live session: the task stops without further events and
    /// drops its socket.
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        if inner.session.take().is_some() {
            inner.generation += 1;
            debug!(url = %self.url, "connection dropped, abandoning session");
        }
    }
}

impl OutboundChannel for Connection {
    fn is_connected(&self) -> bool {
        self.shared.lock().state == ConnectionState::Open
    }

    fn send(&self, text: String) -> bool {
        let inner = self.shared.lock();
        if inner.state != ConnectionState::Open {
            return false;
        }
        match &inner.session {
            Some(session) => match session.tx.try_send(text) {
                Ok(()) => true,
                Err(e) => {
                    warn!(url = %self.url, error = %e, "outbound frame dropped");
                    false
                }
            },
            None => false,
        }
    }
}

struct SessionTask {
    url: String,
    generation: u64,
    shared: Arc<Shared>,
    listener: Arc<dyn ConnectionListener>,
}

impl SessionTask {
    async fn run(
        self,
        mut rx: mpsc::Receiver<String>,
        mut close_rx: oneshot::Receiver<CloseRequest>,
    ) {
        let generation = self.generation;

        let ws = match connect_async(self.url.as_str()).await {
            Ok((ws, _resp)) => ws,
            Err(e) => {
                warn!(url = %self.url, generation, error = %e, "connect failed");
                if self.shared.finish(generation, CLOSE_ABNORMAL, &e.to_string()) {
                    self.listener.on_failure(HexwireError::transport(e));
                }
                return;
            }
        };

        if !self.shared.mark_open(generation) {
            debug!(url = %self.url, generation, "session replaced during handshake");
            return;
        }
        info!(url = %self.url, generation, "connected");
        self.listener.on_open();

        let (mut ws_tx, mut ws_rx) = ws.split();
        let mut close_pending = true;
        let mut peer_close: Option<(u16, String)> = None;

        loop {
            tokio::select! {
                // outbound writer
                maybe_out = rx.recv() => {
                    let Some(text) = maybe_out else {
                        debug!(url = %self.url, generation, "session abandoned");
                        return;
                    };
                    if let Err(e) = ws_tx.send(Message::Text(text)).await {
                        self.fail(e);
                        return;
                    }
                }

                // graceful close request
                req = &mut close_rx, if close_pending => {
                    close_pending = false;
                    let Ok(req) = req else {
                        debug!(url = %self.url, generation, "session abandoned");
                        return;
                    };
                    debug!(url = %self.url, generation, code = req.code, "sending close frame");
                    let frame = CloseFrame {
                        code: CloseCode::from(req.code),
                        reason: req.reason.into(),
                    };
                    if let Err(e) = ws_tx.send(Message::Close(Some(frame))).await {
                        self.fail(e);
                        return;
                    }
                }

                // inbound reader
                incoming = ws_rx.next() => {
                    match incoming {
                        Some(Ok(Message::Text(text))) => {
                            if !self.shared.is_current(generation) {
                                return;
                            }
                            self.listener.on_message(&text);
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let (code, reason) = frame
                                .map(|f| (u16::from(f.code), f.reason.into_owned()))
                                .unwrap_or((CLOSE_NO_STATUS, String::new()));
                            if !self.shared.mark_closing(generation) {
                                return;
                            }
                            info!(
                                url = %self.url,
                                generation,
                                code,
                                reason = %reason,
                                "server closing"
                            );
                            self.listener.on_closing(code, &reason);
                            peer_close = Some((code, reason));
                        }
                        Some(Ok(_)) => {}
                        Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) | None => {
                            match peer_close.take() {
                                Some((code, reason)) => {
                                    if self.shared.finish(generation, code, &reason) {
                                        info!(url = %self.url, generation, code, "closed");
                                        self.listener.on_closed(code, &reason);
                                    }
                                }
                                None => self.fail("stream ended without close handshake"),
                            }
                            return;
                        }
                        Some(Err(e)) => {
                            self.fail(e);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn fail(&self, cause: impl Into<hexwire_core::error::BoxError>) {
        let err = HexwireError::transport(cause);
        warn!(url = %self.url, generation = self.generation, error = %err, "session failed");
        if self
            .shared
            .finish(self.generation, CLOSE_ABNORMAL, &err.to_string())
        {
            self.listener.on_failure(err);
        }
    }
}
