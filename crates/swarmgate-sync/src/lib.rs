//! Coordination handles owned by connections and observed by the swarmgate core.
//!
//! Two primitives cover the post-upgrade coordination a connection may need:
//! - [`EstablishmentEvent`] / [`EstablishmentWaiter`]: a set-once signal that
//!   the connection's handshake finished, for callers that must not hand the
//!   connection to the application before it is ready.
//! - [`NegotiationThrottle`]: counting admission control bounding how many
//!   protocol negotiations run concurrently on one connection.
//!
//! Both are cheap to clone and safe to share; the connection constructs and
//! owns them, everyone else only waits or acquires.

mod establishment;
mod throttle;

pub use establishment::{EstablishmentEvent, EstablishmentWaiter, WaitError};
pub use throttle::{
    NegotiationPermit, NegotiationThrottle, ThrottleError, DEFAULT_NEGOTIATION_LIMIT,
};
