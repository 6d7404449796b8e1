//! Optional reconnect supervisor.
//!
//! `Connection` never reconnects on its own. `Reconnector` sits between the
//! connection and the real listener: it forwards every event, and after a
//! failure or an abnormal close it calls `connect` again on an exponential
//! backoff schedule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tracing::{info, warn};

use hexwire_core::error::HexwireError;

use crate::config::ReconnectSection;
use crate::transport::{Connection, ConnectionListener};

/// Close code for a normal, intentional closure; never retried.
const CLOSE_NORMAL: u16 = 1000;

/// Exponential backoff schedule.
#[derive(Debug, Clone)]
pub struct Backoff {
    attempts: u32,
    delay_ms: u64,
    initial_delay_ms: u64,
    max_delay_ms: u64,
    multiplier: f64,
    max_attempts: u32,
}

impl Backoff {
    pub fn new(policy: &ReconnectSection) -> Self {
        Self {
            attempts: 0,
            delay_ms: policy.initial_delay_ms,
            initial_delay_ms: policy.initial_delay_ms,
            max_delay_ms: policy.max_delay_ms,
            multiplier: policy.multiplier,
            max_attempts: policy.max_attempts,
        }
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
        self.delay_ms = self.initial_delay_ms;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_attempts != 0 && self.attempts >= self.max_attempts
    }

    /// Delay to wait before the next attempt, or `None` once exhausted.
    pub fn next_delay_and_advance(&mut self) -> Option<Duration> {
        if self.is_exhausted() {
            return None;
        }

        let current = self.delay_ms;
        self.attempts += 1;
        self.delay_ms =
            ((self.delay_ms as f64) * self.multiplier).min(self.max_delay_ms as f64) as u64;
        Some(Duration::from_millis(current))
    }
}

/// Listener wrapper that re-establishes the session after it drops.
pub struct Reconnector {
    connection: Arc<Connection>,
    inner: Arc<dyn ConnectionListener>,
    backoff: Mutex<Backoff>,
    stopped: AtomicBool,
    this: Weak<Reconnector>,
}

impl Reconnector {
    pub fn new(
        connection: Arc<Connection>,
        inner: Arc<dyn ConnectionListener>,
        policy: &ReconnectSection,
    ) -> Arc<Self> {
        let backoff = Backoff::new(policy);
        Arc::new_cyclic(|this| Self {
            connection,
            inner,
            backoff: Mutex::new(backoff),
            stopped: AtomicBool::new(false),
            this: this.clone(),
        })
    }

    /// Open the first session with this supervisor as the listener.
    pub fn start(self: &Arc<Self>) {
        self.stopped.store(false, Ordering::SeqCst);
        self.connect();
    }

    /// Stop retrying; call before an intentional close.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn connect(self: &Arc<Self>) {
        let listener: Arc<dyn ConnectionListener> = Arc::clone(self) as Arc<dyn ConnectionListener>;
        self.connection.connect(listener);
    }

    fn schedule(&self) {
        if self.is_stopped() {
            return;
        }
        let Some(delay) = self
            .backoff
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_delay_and_advance()
        else {
            warn!(url = %self.connection.url(), "max reconnection attempts reached, giving up");
            return;
        };
        let Some(this) = self.this.upgrade() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("reconnect skipped: no tokio runtime");
            return;
        };

        info!(url = %self.connection.url(), delay_ms = delay.as_millis() as u64, "reconnecting");
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !this.is_stopped() {
                this.connect();
            }
        });
    }
}

impl ConnectionListener for Reconnector {
    fn on_open(&self) {
        self.backoff
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
        self.inner.on_open();
    }

    fn on_message(&self, text: &str) {
        self.inner.on_message(text);
    }

    fn on_closing(&self, code: u16, reason: &str) {
        self.inner.on_closing(code, reason);
    }

    fn on_closed(&self, code: u16, reason: &str) {
        self.inner.on_closed(code, reason);
        if code != CLOSE_NORMAL {
            self.schedule();
        }
    }

    fn on_failure(&self, err: HexwireError) {
        self.inner.on_failure(err);
        self.schedule();
    }
}
