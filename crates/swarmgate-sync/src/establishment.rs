//! Establishment event — a set-once signal that a connection handshake completed.
//!
//! The connection holds the [`EstablishmentEvent`] and calls `set()` exactly
//! once when its handshake finishes. Callers obtain an [`EstablishmentWaiter`]
//! and suspend on it. The transition is Unestablished → Established, terminal:
//! `set()` is idempotent and the flag never reverts.

use thiserror::Error;
use tokio::sync::watch;

/// Failure while waiting for establishment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError {
    /// The connection dropped its event before ever signaling.
    #[error("connection dropped before establishment completed")]
    ConnectionDropped,
}

/// Owner side of the establishment signal. Held by the connection.
#[derive(Debug)]
pub struct EstablishmentEvent {
    tx: watch::Sender<bool>,
}

/// Observer side of the establishment signal. Cloneable; hand one to anyone
/// who must block until the handshake completes.
#[derive(Debug, Clone)]
pub struct EstablishmentWaiter {
    rx: watch::Receiver<bool>,
}

impl EstablishmentEvent {
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(false),
        }
    }

    /// Mark the connection established. Idempotent; waiters past and future
    /// all observe the set state.
    pub fn set(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the event has been set.
    pub fn is_set(&self) -> bool {
        *self.tx.borrow()
    }

    /// Create a waiter observing this event.
    pub fn waiter(&self) -> EstablishmentWaiter {
        EstablishmentWaiter {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for EstablishmentEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl EstablishmentWaiter {
    /// Whether the event has been set (non-blocking snapshot).
    pub fn is_set(&self) -> bool {
        *self.rx.borrow()
    }

    /// Suspend until the event is set. Resolves immediately if already set.
    /// Errors only if the owning connection dropped the event before setting
    /// it. Timeouts and cancellation are the caller's to compose.
    pub async fn wait(&self) -> Result<(), WaitError> {
        let mut rx = self.rx.clone();
        rx.wait_for(|set| *set)
            .await
            .map(|_| ())
            .map_err(|_| WaitError::ConnectionDropped)
    }
}
