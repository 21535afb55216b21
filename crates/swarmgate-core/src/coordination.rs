//! Coordination helpers — gate establishment waits and negotiation
//! throttling on the handles a connection actually carries.
//!
//! The swarm calls [`wait_until_established`] once after the upgrade pipeline
//! and [`acquire_negotiation_permit`] before each protocol negotiation. Both
//! are no-ops for connections without the corresponding capability.

use swarmgate_sync::{NegotiationPermit, ThrottleError, WaitError};

use crate::capabilities::{
    conn_get_establishment_waiter, conn_has_establishment_wait, conn_is_established,
    ConnectionCapabilities,
};

/// Block until the connection's handshake has completed.
///
/// Connections without full wait support (both a status and a wait handle)
/// are treated as immediately ready — partial support counts as no support,
/// so the swarm never blocks on a handle that may never be signaled. The
/// core imposes no timeout; compose one externally if needed.
pub async fn wait_until_established(conn: &dyn ConnectionCapabilities) -> Result<(), WaitError> {
    if !conn_has_establishment_wait(conn) {
        tracing::trace!("connection has no establishment wait support, treating as ready");
        return Ok(());
    }
    if conn_is_established(conn) {
        tracing::trace!("connection already established, no wait");
        return Ok(());
    }
    let Some(waiter) = conn_get_establishment_waiter(conn) else {
        return Ok(());
    };
    tracing::debug!("waiting for connection establishment");
    waiter.wait().await?;
    tracing::debug!("connection established");
    Ok(())
}

/// Acquire a negotiation slot before starting a protocol negotiation.
///
/// `Ok(None)` means the connection is unthrottled and the negotiation may
/// proceed immediately. Otherwise the returned permit holds a slot until
/// dropped; drop it when the negotiation completes or fails.
pub async fn acquire_negotiation_permit(
    conn: &dyn ConnectionCapabilities,
) -> Result<Option<NegotiationPermit>, ThrottleError> {
    let Some(throttle) = conn.negotiation_throttle() else {
        tracing::trace!("connection unthrottled, negotiation proceeds immediately");
        return Ok(None);
    };
    let permit = throttle.acquire().await?;
    tracing::debug!(available = throttle.available(), "acquired negotiation slot");
    Ok(Some(permit))
}
