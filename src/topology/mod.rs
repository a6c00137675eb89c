//! Network topology module.
//!
//! This module contains the topology registry and the networks, links and
//! hosts it owns, plus the traits through which the rest of the simulator
//! plugs in link statistics, interfaces, randomness and host shutdown.

pub mod frozen;
pub mod host;
pub mod link;
pub mod network;
pub mod registry;
pub mod summary;
pub mod traits;

// Re-export key types for easier access
pub use frozen::FrozenTopology;
pub use host::Host;
pub use link::Link;
pub use network::Network;
pub use registry::{LatencyBounds, TopologyRegistry};
pub use summary::TopologySummary;
pub use traits::{
    HostLifecycle, InterfaceFactory, JitterLinkModel, LinkModel, NetworkInterface, RandomSource,
    ShapedInterface, ShapedInterfaceFactory,
};
