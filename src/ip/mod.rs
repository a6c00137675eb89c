//! Address management for simulated hosts.
//!
//! This module handles synthetic IPv4 address allocation and the directory
//! that binds hostnames, addresses and owning networks together.

pub mod address;
pub mod allocator;
pub mod directory;

// Re-export commonly used types
pub use address::Address;
pub use allocator::AddressAllocator;
pub use directory::HostDirectory;
