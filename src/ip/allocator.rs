//! Synthetic address allocation.
//!
//! Addresses come from a monotonically increasing counter. Reserved values
//! are skipped, and the counter never wraps, so every address handed out is
//! distinct from every earlier one without a lookup against the directory.

use std::net::Ipv4Addr;

use crate::error::{Result, TopologyError};
use super::address::Address;

/// Monotonic address allocator
#[derive(Debug, Clone)]
pub struct AddressAllocator {
    counter: u32,
    allocated: usize,
}

impl AddressAllocator {
    /// Allocator whose first address is `0.0.0.1`
    pub fn new() -> Self {
        Self::starting_after(Ipv4Addr::UNSPECIFIED)
    }

    /// Allocator whose first address is the one following `base`
    pub fn starting_after(base: Ipv4Addr) -> Self {
        Self {
            counter: u32::from(base),
            allocated: 0,
        }
    }

    /// Produce the next assignable address.
    ///
    /// Fails with [`TopologyError::AddressSpaceExhausted`] once the counter
    /// would have to wrap past `255.255.255.255`.
    pub fn next_address(&mut self) -> Result<Address> {
        loop {
            let next = self
                .counter
                .checked_add(1)
                .ok_or(TopologyError::AddressSpaceExhausted)?;
            self.counter = next;

            let address = Address::from_bits(next);
            if !address.is_reserved() {
                self.allocated += 1;
                return Ok(address);
            }
            log::debug!("Skipping reserved address {}", address);
        }
    }

    /// Number of addresses handed out so far
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

impl Default for AddressAllocator {
    fn default() -> Self {
        Self::new()
    }
}
