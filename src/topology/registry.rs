//! The topology registry.
//!
//! Owns every network, link and host of a simulation together with the
//! indices used to resolve them. The registry is populated once by a single
//! builder and then frozen; from that point on it is read-only and may be
//! shared between simulation workers (see [`FrozenTopology`]).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use super::frozen::FrozenTopology;
use super::host::Host;
use super::link::Link;
use super::network::Network;
use super::traits::{
    HostLifecycle, InterfaceFactory, JitterLinkModel, LinkModel, RandomSource,
    ShapedInterfaceFactory,
};
use crate::error::{Result, TopologyError};
use crate::identity::{HostId, Interner, NetworkId};
use crate::ip::{Address, AddressAllocator, HostDirectory};

/// Smallest and largest one-way latency any link can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyBounds {
    pub min: Duration,
    pub max: Duration,
}

impl LatencyBounds {
    fn of(link: &Link) -> Self {
        Self {
            min: link.min_latency(),
            max: link.max_latency(),
        }
    }

    fn widen(&mut self, link: &Link) {
        self.min = self.min.min(link.min_latency());
        self.max = self.max.max(link.max_latency());
    }
}

/// Registry of networks, links and hosts
#[derive(Debug)]
pub struct TopologyRegistry {
    network_ids: Interner<NetworkId>,
    host_ids: Interner<HostId>,
    networks: Vec<Network>,
    network_slots: HashMap<NetworkId, usize>,
    hosts: HashMap<HostId, Host>,
    links: Vec<Arc<Link>>,
    directory: HostDirectory,
    allocator: AddressAllocator,
    latency_bounds: Option<LatencyBounds>,
    link_model: Box<dyn LinkModel>,
    interfaces: Box<dyn InterfaceFactory>,
    frozen: bool,
}

impl TopologyRegistry {
    /// Empty registry using the jitter link model and shaped interfaces
    pub fn new() -> Self {
        Self::with_allocator(AddressAllocator::new())
    }

    /// Empty registry that hands out host addresses from `allocator`
    pub fn with_allocator(allocator: AddressAllocator) -> Self {
        Self {
            network_ids: Interner::new(),
            host_ids: Interner::new(),
            networks: Vec::new(),
            network_slots: HashMap::new(),
            hosts: HashMap::new(),
            links: Vec::new(),
            directory: HostDirectory::new(),
            allocator,
            latency_bounds: None,
            link_model: Box::new(JitterLinkModel),
            interfaces: Box::new(ShapedInterfaceFactory),
            frozen: false,
        }
    }

    pub fn with_link_model(mut self, model: impl LinkModel + 'static) -> Self {
        self.link_model = Box::new(model);
        self
    }

    pub fn with_interface_factory(mut self, factory: impl InterfaceFactory + 'static) -> Self {
        self.interfaces = Box::new(factory);
        self
    }

    // Identifiers

    /// Identifier for a network name, minted on first use.
    ///
    /// Once frozen no new identifiers are minted.
    pub fn intern_network(&mut self, name: &str) -> Result<NetworkId> {
        self.ensure_building()?;
        self.network_ids.intern(name)
    }

    /// Identifier for a host name, minted on first use.
    ///
    /// Once frozen no new identifiers are minted.
    pub fn intern_host(&mut self, name: &str) -> Result<HostId> {
        self.ensure_building()?;
        self.host_ids.intern(name)
    }

    pub fn network_id(&self, name: &str) -> Option<NetworkId> {
        self.network_ids.lookup(name)
    }

    pub fn host_id(&self, name: &str) -> Option<HostId> {
        self.host_ids.lookup(name)
    }

    pub fn network_name(&self, id: NetworkId) -> Option<&str> {
        self.network_ids.resolve(id)
    }

    pub fn host_name(&self, id: HostId) -> Option<&str> {
        self.host_ids.resolve(id)
    }

    // Construction

    fn ensure_building(&self) -> Result<()> {
        if self.frozen {
            return Err(TopologyError::AlreadyFrozen);
        }
        Ok(())
    }

    /// Add a network with no links
    pub fn create_network(&mut self, id: NetworkId, bandwidth_down: u64, bandwidth_up: u64) -> Result<()> {
        self.ensure_building()?;
        if self.network_slots.contains_key(&id) {
            return Err(TopologyError::DuplicateNetwork(id));
        }

        self.network_slots.insert(id, self.networks.len());
        self.networks.push(Network::new(id, bandwidth_down, bandwidth_up));
        debug!(
            "Created network {} (down {} KiB/s, up {} KiB/s)",
            id, bandwidth_down, bandwidth_up
        );
        Ok(())
    }

    /// Intern `name` and add a network for it
    pub fn add_network(&mut self, name: &str, bandwidth_down: u64, bandwidth_up: u64) -> Result<NetworkId> {
        self.ensure_building()?;
        if let Some(id) = self.network_ids.lookup(name) {
            if self.network_slots.contains_key(&id) {
                return Err(TopologyError::DuplicateNetwork(id));
            }
        }
        let id = self.network_ids.intern(name)?;
        self.create_network(id, bandwidth_down, bandwidth_up)?;
        Ok(id)
    }

    /// Add a directed link from `source` to `destination`.
    ///
    /// A bidirectional connection takes two calls.
    pub fn connect_networks(
        &mut self,
        source: NetworkId,
        destination: NetworkId,
        latency: Duration,
        jitter: Duration,
        packet_loss: f64,
    ) -> Result<()> {
        self.ensure_building()?;
        let source_slot = self.slot(source)?;
        let destination_slot = self.slot(destination)?;

        let link = Arc::new(Link::new(source, destination, latency, jitter, packet_loss)?);
        if jitter > latency {
            warn!(
                "Link {} -> {} has jitter {:?} above latency {:?}; minimum latency clamped to zero",
                source, destination, jitter, latency
            );
        }

        self.networks[source_slot].add_outgoing_link(Arc::clone(&link));
        self.networks[destination_slot].add_incoming_link(Arc::clone(&link));
        self.track_latency(&link);
        self.links.push(link);

        debug!(
            "Connected {} -> {} (latency {:?}, jitter {:?}, loss {})",
            source, destination, latency, jitter, packet_loss
        );
        Ok(())
    }

    fn track_latency(&mut self, link: &Link) {
        match self.latency_bounds.as_mut() {
            Some(bounds) => bounds.widen(link),
            None => self.latency_bounds = Some(LatencyBounds::of(link)),
        }
    }

    /// Add a host to `network_id` and assign it the next free address.
    ///
    /// Every check runs before the address is allocated, so a failed call
    /// leaves the registry exactly as it was.
    pub fn create_host(
        &mut self,
        id: HostId,
        network_id: NetworkId,
        hostname: &str,
        bandwidth_down: u64,
        bandwidth_up: u64,
        compute_capacity: u64,
    ) -> Result<Address> {
        self.ensure_building()?;
        let slot = self.slot(network_id)?;
        if self.hosts.contains_key(&id) {
            return Err(TopologyError::DuplicateHost(id));
        }
        self.directory.ensure_unbound(hostname)?;

        let address = self.allocator.next_address()?;
        self.insert_host(
            id,
            network_id,
            slot,
            hostname,
            address,
            bandwidth_down,
            bandwidth_up,
            compute_capacity,
        )
    }

    /// Intern `hostname` and add a host for it.
    ///
    /// The name is only interned once every check has passed, so a failed
    /// call mints no identifier.
    pub fn add_host(
        &mut self,
        hostname: &str,
        network_id: NetworkId,
        bandwidth_down: u64,
        bandwidth_up: u64,
        compute_capacity: u64,
    ) -> Result<HostId> {
        self.ensure_building()?;
        let slot = self.slot(network_id)?;
        if let Some(id) = self.host_ids.lookup(hostname) {
            if self.hosts.contains_key(&id) {
                return Err(TopologyError::DuplicateHost(id));
            }
        }
        self.directory.ensure_unbound(hostname)?;

        let address = self.allocator.next_address()?;
        let id = self.host_ids.intern(hostname)?;
        self.insert_host(
            id,
            network_id,
            slot,
            hostname,
            address,
            bandwidth_down,
            bandwidth_up,
            compute_capacity,
        )?;
        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_host(
        &mut self,
        id: HostId,
        network_id: NetworkId,
        slot: usize,
        hostname: &str,
        address: Address,
        bandwidth_down: u64,
        bandwidth_up: u64,
        compute_capacity: u64,
    ) -> Result<Address> {
        let interface = self
            .interfaces
            .create(id, &self.networks[slot], bandwidth_down, bandwidth_up);

        self.directory.bind(hostname, address, network_id)?;
        self.hosts.insert(
            id,
            Host::new(
                id,
                network_id,
                address,
                hostname.to_string(),
                bandwidth_down,
                bandwidth_up,
                compute_capacity,
                interface,
            ),
        );

        debug!("Created host {} '{}' on {} at {}", id, hostname, network_id, address);
        Ok(address)
    }

    /// Stop accepting construction calls. Irreversible.
    pub fn freeze(&mut self) {
        if !self.frozen {
            info!(
                "Topology frozen with {} networks, {} links and {} hosts",
                self.networks.len(),
                self.links.len(),
                self.hosts.len()
            );
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freeze and hand out a shareable read-only handle
    pub fn seal(mut self) -> FrozenTopology {
        self.freeze();
        FrozenTopology::new(self)
    }

    // Queries

    fn slot(&self, id: NetworkId) -> Result<usize> {
        self.network_slots
            .get(&id)
            .copied()
            .ok_or(TopologyError::UnknownNetwork(id))
    }

    pub fn get_network(&self, id: NetworkId) -> Option<&Network> {
        self.network_slots.get(&id).map(|&slot| &self.networks[slot])
    }

    pub fn get_host(&self, id: HostId) -> Option<&Host> {
        self.hosts.get(&id)
    }

    /// All hosts, in no particular order
    pub fn all_hosts(&self) -> impl Iterator<Item = &Host> {
        self.hosts.values()
    }

    /// All networks, in creation order
    pub fn all_networks(&self) -> impl Iterator<Item = &Network> {
        self.networks.iter()
    }

    /// All links, in creation order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().map(Arc::as_ref)
    }

    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn link_model(&self) -> &dyn LinkModel {
        self.link_model.as_ref()
    }

    /// Pick a network uniformly at random using the caller's generator
    pub fn pick_random_network<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<&Network> {
        if self.networks.is_empty() {
            return Err(TopologyError::EmptyTopology);
        }

        let count = self.networks.len();
        let draw = rng.next_uniform_double();
        let index = ((count as f64) * draw) as usize;
        Ok(&self.networks[index.min(count - 1)])
    }

    /// Network owning the host that holds `address`
    pub fn network_for_address(&self, address: Address) -> Option<&Network> {
        self.directory
            .network_of(address)
            .and_then(|id| self.get_network(id))
    }

    pub fn resolve_hostname(&self, hostname: &str) -> Option<Address> {
        self.directory.address_of(hostname)
    }

    pub fn resolve_address(&self, address: Address) -> Option<&str> {
        self.directory.hostname_of(address)
    }

    fn host(&self, id: HostId) -> Result<&Host> {
        self.hosts.get(&id).ok_or(TopologyError::UnknownHost(id))
    }

    /// Shaped upstream throughput of a host, in KiB/s
    pub fn bandwidth_up(&self, host: HostId) -> Result<u64> {
        Ok(self.host(host)?.interface().speed_up_kibps())
    }

    /// Shaped downstream throughput of a host, in KiB/s
    pub fn bandwidth_down(&self, host: HostId) -> Result<u64> {
        Ok(self.host(host)?.interface().speed_down_kibps())
    }

    /// Owning networks of two hosts
    fn network_pair(&self, source: HostId, destination: HostId) -> Result<(&Network, NetworkId)> {
        let source_network = self.host(source)?.network_id();
        let destination_network = self.host(destination)?.network_id();
        let network = self
            .get_network(source_network)
            .ok_or(TopologyError::UnknownNetwork(source_network))?;
        Ok((network, destination_network))
    }

    /// Delivery probability between the networks of two hosts
    pub fn reliability(&self, source: HostId, destination: HostId) -> Result<f64> {
        let (network, to) = self.network_pair(source, destination)?;
        network.link_reliability(to, self.link_model())
    }

    /// Latency between the networks of two hosts at `percentile`
    pub fn latency(&self, source: HostId, destination: HostId, percentile: f64) -> Result<Duration> {
        let (network, to) = self.network_pair(source, destination)?;
        network.link_latency(to, percentile, self.link_model())
    }

    /// Latency between the networks of two hosts at a random percentile
    pub fn sample_latency<R: RandomSource + ?Sized>(
        &self,
        source: HostId,
        destination: HostId,
        rng: &mut R,
    ) -> Result<Duration> {
        let (network, to) = self.network_pair(source, destination)?;
        network.sample_link_latency(to, self.link_model(), rng)
    }

    /// `(min, max)` one-way latency over every link added so far.
    ///
    /// `None` until the first link exists.
    pub fn global_latency_bounds(&self) -> Option<LatencyBounds> {
        self.latency_bounds
    }

    // Teardown

    /// Stop every host's applications, then release all storage.
    ///
    /// Hosts are stopped in identifier order while the registry is still
    /// fully intact.
    pub fn teardown<L: HostLifecycle + ?Sized>(self, lifecycle: &mut L) {
        let mut ids: Vec<HostId> = self.hosts.keys().copied().collect();
        ids.sort();

        info!("Stopping applications on {} hosts", ids.len());
        for id in ids {
            if let Some(host) = self.hosts.get(&id) {
                lifecycle.stop_applications(host, &self);
            }
        }

        debug!("Releasing topology storage");
        drop(self);
    }
}

impl Default for TopologyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
