//! Hostname and address directory.
//!
//! The three lookup tables used to route simulated traffic live behind a
//! single mutator, [`HostDirectory::bind`], so a hostname, its address and
//! its owning network are always recorded together or not at all.

use std::collections::HashMap;

use crate::error::{Result, TopologyError};
use crate::identity::NetworkId;
use super::address::Address;

/// Bijective hostname <-> address map plus address -> network membership
#[derive(Debug, Default)]
pub struct HostDirectory {
    network_by_address: HashMap<Address, NetworkId>,
    address_by_hostname: HashMap<String, Address>,
    hostname_by_address: HashMap<Address, String>,
}

impl HostDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `hostname` could be bound right now
    pub fn ensure_unbound(&self, hostname: &str) -> Result<()> {
        if self.address_by_hostname.contains_key(hostname) {
            return Err(TopologyError::DuplicateHostname(hostname.to_string()));
        }
        Ok(())
    }

    /// Record a host's hostname, address and network in all three tables.
    ///
    /// Fails without touching any table if the hostname is already bound.
    /// Binding an address twice is a bug in the allocator and panics.
    pub fn bind(&mut self, hostname: &str, address: Address, network: NetworkId) -> Result<()> {
        self.ensure_unbound(hostname)?;
        assert!(
            !self.hostname_by_address.contains_key(&address),
            "address {} assigned to more than one host",
            address
        );

        self.network_by_address.insert(address, network);
        self.address_by_hostname.insert(hostname.to_string(), address);
        self.hostname_by_address.insert(address, hostname.to_string());

        debug_assert_eq!(self.address_by_hostname.len(), self.hostname_by_address.len());
        debug_assert_eq!(self.network_by_address.len(), self.hostname_by_address.len());
        Ok(())
    }

    pub fn address_of(&self, hostname: &str) -> Option<Address> {
        self.address_by_hostname.get(hostname).copied()
    }

    pub fn hostname_of(&self, address: Address) -> Option<&str> {
        self.hostname_by_address.get(&address).map(String::as_str)
    }

    pub fn network_of(&self, address: Address) -> Option<NetworkId> {
        self.network_by_address.get(&address).copied()
    }

    pub fn len(&self) -> usize {
        self.hostname_by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hostname_by_address.is_empty()
    }
}
