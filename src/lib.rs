//! # simnet-topology - Topology registry for network simulations
//!
//! This library holds the authoritative in-memory model of a simulated
//! internet: the networks (clusters) that make up the topology graph, the
//! directed links between them, and the hosts attached to each network
//! together with their synthetic IPv4 addresses.
//!
//! ## Lifecycle
//!
//! A [`TopologyRegistry`](topology::TopologyRegistry) is populated by a
//! single builder, then frozen. After [`seal`](topology::TopologyRegistry::seal)
//! it becomes a [`FrozenTopology`](topology::FrozenTopology): a cloneable,
//! read-only handle that simulation workers query concurrently.
//!
//! ## Architecture
//!
//! - `identity`: name interning and the `NetworkId` / `HostId` types
//! - `ip`: address type, monotonic allocator and hostname directory
//! - `topology`: links, networks, hosts, the registry and collaborator traits
//! - `config`: YAML topology description and validation
//! - `config_loader`: loading topology files
//! - `build`: populating a registry from a configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use simnet_topology::topology::TopologyRegistry;
//! use std::time::Duration;
//!
//! let mut registry = TopologyRegistry::new();
//! let n1 = registry.add_network("N1", 1000, 500)?;
//! let n2 = registry.add_network("N2", 2000, 1000)?;
//! registry.connect_networks(n1, n2, Duration::from_millis(50), Duration::from_millis(5), 0.01)?;
//! let alice = registry.add_host("alice", n1, 1000, 500, 1_000_000)?;
//! let bob = registry.add_host("bob", n2, 2000, 1000, 1_000_000)?;
//!
//! let topology = registry.seal();
//! assert_eq!(topology.latency(alice, bob, 1.0)?, Duration::from_millis(55));
//! assert!(topology.resolve_hostname("alice").is_some());
//! # Ok::<(), simnet_topology::TopologyError>(())
//! ```
//!
//! ## Error Handling
//!
//! Registry operations return [`TopologyError`]. Configuration loading and
//! the command-line tool use `color_eyre` for error reporting with context.

pub mod build;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod identity;
pub mod ip;
pub mod topology;

pub use error::TopologyError;
