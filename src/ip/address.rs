//! Simulated IPv4 addresses.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// A 32-bit IPv4 address assigned to a simulated host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(Ipv4Addr);

impl Address {
    /// `0.0.0.0` (INADDR_ANY)
    pub const UNSPECIFIED: Address = Address(Ipv4Addr::UNSPECIFIED);
    /// `127.0.0.1` (INADDR_LOOPBACK)
    pub const LOOPBACK: Address = Address(Ipv4Addr::LOCALHOST);
    /// `255.255.255.255` (INADDR_BROADCAST, also INADDR_NONE)
    pub const BROADCAST: Address = Address(Ipv4Addr::BROADCAST);

    const RESERVED: [Address; 3] = [Self::UNSPECIFIED, Self::LOOPBACK, Self::BROADCAST];

    /// Build an address from its host-order integer value
    pub fn from_bits(bits: u32) -> Self {
        Self(Ipv4Addr::from(bits))
    }

    /// Host-order integer value
    pub fn to_bits(self) -> u32 {
        u32::from(self.0)
    }

    /// Octets in network byte order
    pub fn to_network_bytes(self) -> [u8; 4] {
        self.0.octets()
    }

    /// Returns true for values that must never be assigned to a host
    pub fn is_reserved(self) -> bool {
        Self::RESERVED.contains(&self)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Self(ip)
    }
}

impl From<Address> for Ipv4Addr {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
