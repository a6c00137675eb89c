//! Identifier space for networks and hosts.
//!
//! Names are interned into small integers once and resolved back on demand.
//! Networks and hosts get distinct identifier types so one can never be
//! passed where the other is expected.

pub mod interner;

pub use interner::Interner;

use std::fmt;

/// Identifier types that can be minted by an [`Interner`].
pub trait InternedId: Copy + Eq + std::hash::Hash + fmt::Debug {
    fn from_index(index: u32) -> Self;
    fn index(self) -> u32;
}

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl InternedId for $name {
            fn from_index(index: u32) -> Self {
                Self(index)
            }

            fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

interned_id!(
    /// Identifier of a network (cluster) in the topology
    NetworkId,
    "network"
);

interned_id!(
    /// Identifier of a simulated host
    HostId,
    "host"
);
