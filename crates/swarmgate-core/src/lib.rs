//! swarmgate-core — capability classifier and upgrade planner for P2P transports.
//!
//! The swarm/host layer branches on transport and connection *capabilities*
//! ("provides secure connection", "provides muxed connection") instead of
//! concrete types. That keeps it decoupled from specific implementations and
//! supports every combination of upgrade needs:
//!
//! - **Neither**: raw byte stream → run security then muxer (e.g. TCP).
//! - **Secure only**: encrypted from dial → run muxer only.
//! - **Muxed only**: muxed but not secure from dial → run security only.
//! - **Both**: fully integrated channel → skip the upgrade pipeline (e.g. QUIC).
//!
//! The classifier answers the capability questions, the [`UpgradePlan`] turns
//! them into exactly one upgrade action, and the coordination helpers gate
//! establishment waits and negotiation throttling on whatever handles the
//! connection actually carries.

mod capabilities;
mod coordination;
mod upgrade;

pub use capabilities::{
    conn_get_establishment_waiter, conn_has_establishment_wait, conn_has_negotiation_throttle,
    conn_has_resource_scope, conn_is_established, transport_provides_muxed_connection,
    transport_provides_secure_connection, transport_provides_secure_muxed, CapabilityRecord,
    ConnectionCapabilities, ResourceScope, ResourceScopeAttach, TransportCapabilities,
};
pub use coordination::{acquire_negotiation_permit, wait_until_established};
pub use upgrade::UpgradePlan;

pub use swarmgate_sync::{
    EstablishmentEvent, EstablishmentWaiter, NegotiationPermit, NegotiationThrottle,
    ThrottleError, WaitError, DEFAULT_NEGOTIATION_LIMIT,
};
