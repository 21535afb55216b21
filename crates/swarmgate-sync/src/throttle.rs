//! Negotiation throttle — bounds concurrent protocol negotiations per connection.
//!
//! A connection that multiplexes many streams can see bursts of inbound
//! protocol negotiations; the throttle caps how many run at once. Permits are
//! RAII: dropping a [`NegotiationPermit`] releases its slot, so release is
//! unconditional on success and failure paths alike.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default cap on concurrent negotiations for connections that do not pick
/// their own limit.
pub const DEFAULT_NEGOTIATION_LIMIT: usize = 8;

/// Failure while acquiring a negotiation slot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThrottleError {
    /// The throttle was closed (connection shutting down); no further
    /// negotiations are admitted.
    #[error("negotiation throttle closed")]
    Closed,
}

/// Counting admission control for protocol negotiations on one connection.
/// Cloneable handle; all clones share the same permit pool.
#[derive(Debug, Clone)]
pub struct NegotiationThrottle {
    sem: Arc<Semaphore>,
}

/// A held negotiation slot. Released back to the throttle on drop.
#[derive(Debug)]
pub struct NegotiationPermit {
    _permit: OwnedSemaphorePermit,
}

impl NegotiationThrottle {
    /// Throttle admitting at most `limit` concurrent negotiations.
    pub fn new(limit: usize) -> Self {
        Self {
            sem: Arc::new(Semaphore::new(limit)),
        }
    }

    /// Acquire a slot, suspending until one is free. Admission ordering is
    /// the semaphore's (FIFO in tokio); the caller does not get to pick.
    pub async fn acquire(&self) -> Result<NegotiationPermit, ThrottleError> {
        let permit = self
            .sem
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ThrottleError::Closed)?;
        Ok(NegotiationPermit { _permit: permit })
    }

    /// Acquire without suspending; `None` when all slots are taken.
    pub fn try_acquire(&self) -> Result<Option<NegotiationPermit>, ThrottleError> {
        match self.sem.clone().try_acquire_owned() {
            Ok(permit) => Ok(Some(NegotiationPermit { _permit: permit })),
            Err(tokio::sync::TryAcquireError::NoPermits) => Ok(None),
            Err(tokio::sync::TryAcquireError::Closed) => Err(ThrottleError::Closed),
        }
    }

    /// Free slots right now. Diagnostic only; racy by nature.
    pub fn available(&self) -> usize {
        self.sem.available_permits()
    }

    /// Stop admitting negotiations. Pending and future `acquire` calls fail
    /// with [`ThrottleError::Closed`]; held permits stay valid until dropped.
    pub fn close(&self) {
        self.sem.close();
    }
}

impl Default for NegotiationThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_NEGOTIATION_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn permits_bound_concurrency_and_release_on_drop() {
        let throttle = NegotiationThrottle::new(2);
        let a = throttle.acquire().await.unwrap();
        let _b = throttle.acquire().await.unwrap();
        assert_eq!(throttle.available(), 0);
        assert!(throttle.try_acquire().unwrap().is_none());

        drop(a);
        assert_eq!(throttle.available(), 1);
        assert!(throttle.try_acquire().unwrap().is_some());
    }

    #[tokio::test]
    async fn clones_share_one_pool() {
        let throttle = NegotiationThrottle::new(1);
        let clone = throttle.clone();
        let _held = throttle.acquire().await.unwrap();
        assert!(clone.try_acquire().unwrap().is_none());
    }

    #[tokio::test]
    async fn closed_throttle_rejects_acquire() {
        let throttle = NegotiationThrottle::new(1);
        throttle.close();
        assert_eq!(throttle.acquire().await.unwrap_err(), ThrottleError::Closed);
        assert_eq!(throttle.try_acquire().unwrap_err(), ThrottleError::Closed);
    }

    #[tokio::test]
    async fn default_limit_is_nonzero() {
        let throttle = NegotiationThrottle::default();
        assert_eq!(throttle.available(), DEFAULT_NEGOTIATION_LIMIT);
    }
}
