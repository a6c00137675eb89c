//! Read-only, shareable view of a frozen topology.

use std::ops::Deref;
use std::sync::Arc;

use super::registry::TopologyRegistry;
use super::traits::HostLifecycle;

/// Cheaply cloneable handle to a frozen [`TopologyRegistry`].
///
/// Only the query API is reachable through this handle, so simulation
/// workers can hold clones on any thread without coordination.
#[derive(Debug, Clone)]
pub struct FrozenTopology {
    inner: Arc<TopologyRegistry>,
}

impl FrozenTopology {
    pub(crate) fn new(registry: TopologyRegistry) -> Self {
        debug_assert!(registry.is_frozen());
        Self {
            inner: Arc::new(registry),
        }
    }

    /// Number of live handles, this one included
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Tear the topology down if this is the last handle.
    ///
    /// Returns the handle unchanged while other clones are still alive.
    pub fn teardown<L: HostLifecycle + ?Sized>(self, lifecycle: &mut L) -> Result<(), Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(registry) => {
                registry.teardown(lifecycle);
                Ok(())
            }
            Err(inner) => {
                log::warn!(
                    "Refusing teardown while {} other topology handles are alive",
                    Arc::strong_count(&inner) - 1
                );
                Err(Self { inner })
            }
        }
    }
}

impl Deref for FrozenTopology {
    type Target = TopologyRegistry;

    fn deref(&self) -> &TopologyRegistry {
        &self.inner
    }
}
