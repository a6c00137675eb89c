//! Simulated hosts.

use super::traits::NetworkInterface;
use crate::identity::{HostId, NetworkId};
use crate::ip::Address;

/// A simulated machine attached to exactly one network
#[derive(Debug)]
pub struct Host {
    id: HostId,
    network_id: NetworkId,
    address: Address,
    hostname: String,
    bandwidth_down: u64,
    bandwidth_up: u64,
    compute_capacity: u64,
    interface: Box<dyn NetworkInterface>,
}

impl Host {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: HostId,
        network_id: NetworkId,
        address: Address,
        hostname: String,
        bandwidth_down: u64,
        bandwidth_up: u64,
        compute_capacity: u64,
        interface: Box<dyn NetworkInterface>,
    ) -> Self {
        Self {
            id,
            network_id,
            address,
            hostname,
            bandwidth_down,
            bandwidth_up,
            compute_capacity,
            interface,
        }
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Configured downstream bandwidth in KiB/s
    pub fn bandwidth_down(&self) -> u64 {
        self.bandwidth_down
    }

    /// Configured upstream bandwidth in KiB/s
    pub fn bandwidth_up(&self) -> u64 {
        self.bandwidth_up
    }

    /// CPU capacity in cycles per second
    pub fn compute_capacity(&self) -> u64 {
        self.compute_capacity
    }

    pub fn interface(&self) -> &dyn NetworkInterface {
        self.interface.as_ref()
    }
}
