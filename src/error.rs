//! Errors reported by the topology registry.

use crate::identity::{HostId, NetworkId};

/// Topology construction and query errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("topology is frozen; construction calls are no longer accepted")]
    AlreadyFrozen,
    #[error("network {0} already exists")]
    DuplicateNetwork(NetworkId),
    #[error("host {0} already exists")]
    DuplicateHost(HostId),
    #[error("hostname '{0}' is already bound to another host")]
    DuplicateHostname(String),
    #[error("unknown network {0}")]
    UnknownNetwork(NetworkId),
    #[error("no network named '{0}'")]
    UnknownNetworkName(String),
    #[error("unknown host {0}")]
    UnknownHost(HostId),
    #[error("topology has no networks")]
    EmptyTopology,
    #[error("identifier space exhausted; no more names can be interned")]
    IdentifierSpaceExhausted,
    #[error("address space exhausted; no assignable address remains")]
    AddressSpaceExhausted,
    #[error("invalid link: {0}")]
    InvalidLink(String),
    #[error("no link from {from} to {to}")]
    NoRoute { from: NetworkId, to: NetworkId },
}

pub type Result<T, E = TopologyError> = std::result::Result<T, E>;
