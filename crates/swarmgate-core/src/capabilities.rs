//! Transport and connection capability checks.
//!
//! Capabilities are optional trait methods with conservative defaults: a
//! transport or connection that does not override a method does not have the
//! capability. The one deliberate exception is establishment status, whose
//! absence means "already ready" rather than "never ready" — a connection
//! with no notion of staged establishment must not be waited on.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use swarmgate_sync::{EstablishmentWaiter, NegotiationThrottle};

/// Opaque resource-accounting scope, owned by the resource manager.
pub trait ResourceScope: Send + Sync + fmt::Debug {}

/// Implemented by connections that accept a resource-accounting scope
/// (e.g. for connection-level cleanup when the scope closes).
pub trait ResourceScopeAttach {
    fn attach_resource_scope(&self, scope: Arc<dyn ResourceScope>);
}

/// Capability surface of a transport. Every method defaults to `false`;
/// transports override only what their dial()/listen() output provides.
pub trait TransportCapabilities {
    /// Connections from this transport are already authenticated and
    /// encrypted; the security upgrade stage is skipped when `true`.
    fn provides_secure_connection(&self) -> bool {
        false
    }

    /// Connections from this transport already carry independent logical
    /// streams; the muxer upgrade stage is skipped when `true`. Orthogonal
    /// to [`provides_secure_connection`](Self::provides_secure_connection).
    fn provides_muxed_connection(&self) -> bool {
        false
    }
}

/// Capability surface of a connection. Every accessor defaults to `None`;
/// a connection overrides only the facilities it actually carries.
pub trait ConnectionCapabilities: Sync {
    /// Setter for a resource-accounting scope, if the connection accepts one.
    fn resource_scope_setter(&self) -> Option<&dyn ResourceScopeAttach> {
        None
    }

    /// Whether the handshake has completed. `None` means the connection has
    /// no staged establishment at all.
    fn establishment_status(&self) -> Option<bool> {
        None
    }

    /// Handle to block on until the handshake completes, if the connection
    /// carries one.
    fn establishment_waiter(&self) -> Option<EstablishmentWaiter> {
        None
    }

    /// Admission-control handle bounding concurrent protocol negotiations,
    /// if the connection carries one.
    fn negotiation_throttle(&self) -> Option<NegotiationThrottle> {
        None
    }
}

/// Return true if this transport's dial() returns at least a secure
/// connection. The swarm skips the security upgrade when true.
pub fn transport_provides_secure_connection(transport: &dyn TransportCapabilities) -> bool {
    transport.provides_secure_connection()
}

/// Return true if this transport's dial() returns a muxed connection. The
/// swarm skips the muxer upgrade when true. The connection may be secure or
/// not (see [`transport_provides_secure_connection`]).
pub fn transport_provides_muxed_connection(transport: &dyn TransportCapabilities) -> bool {
    transport.provides_muxed_connection()
}

/// Return true if this transport provides both secure and muxed connections.
/// Convenience for "skip the full upgrade pipeline".
pub fn transport_provides_secure_muxed(transport: &dyn TransportCapabilities) -> bool {
    transport.provides_secure_connection() && transport.provides_muxed_connection()
}

/// Return true if this connection accepts a resource scope for resource
/// manager integration.
pub fn conn_has_resource_scope(conn: &dyn ConnectionCapabilities) -> bool {
    conn.resource_scope_setter().is_some()
}

/// Return true if this connection has both an establishment status and a
/// wait handle, so the swarm should wait for establishment before treating
/// it as ready. Both are required: a status with nothing to block on is not
/// waitable, and a handle with no status may never be signaled.
pub fn conn_has_establishment_wait(conn: &dyn ConnectionCapabilities) -> bool {
    conn.establishment_status().is_some() && conn.establishment_waiter().is_some()
}

/// Return the wait handle, or `None`. Raw lookup of the handle alone —
/// callers should only wait when [`conn_has_establishment_wait`] is true.
pub fn conn_get_establishment_waiter(
    conn: &dyn ConnectionCapabilities,
) -> Option<EstablishmentWaiter> {
    conn.establishment_waiter()
}

/// Return whether the connection is established (handshake completed).
/// A connection with no establishment status is already ready: no wait
/// needed.
pub fn conn_is_established(conn: &dyn ConnectionCapabilities) -> bool {
    conn.establishment_status().unwrap_or(true)
}

/// Return true if this connection exposes a throttle for bounding
/// concurrent protocol negotiations (e.g. server-side).
pub fn conn_has_negotiation_throttle(conn: &dyn ConnectionCapabilities) -> bool {
    conn.negotiation_throttle().is_some()
}

/// Snapshot of a transport's two capability flags. Derived on demand, never
/// cached by the core; capability is a static property of the transport
/// type, so callers may memoize per instance. Serializable so peers can
/// advertise it alongside their other capability tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    /// dial()/listen() output is already authenticated and encrypted.
    pub secure: bool,
    /// dial()/listen() output already supports independent logical streams.
    pub muxed: bool,
}

impl CapabilityRecord {
    /// Probe a transport's capability flags. The two flags are read
    /// independently; neither implies the other.
    pub fn probe(transport: &dyn TransportCapabilities) -> Self {
        Self {
            secure: transport.provides_secure_connection(),
            muxed: transport.provides_muxed_connection(),
        }
    }
}
