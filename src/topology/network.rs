//! Networks (clusters): the vertices of the topology graph.

use std::sync::Arc;
use std::time::Duration;

use super::link::Link;
use super::traits::{LinkModel, RandomSource};
use crate::error::{Result, TopologyError};
use crate::identity::NetworkId;

/// A point of presence with shared bandwidth and directed links to its peers
#[derive(Debug)]
pub struct Network {
    id: NetworkId,
    bandwidth_down: u64,
    bandwidth_up: u64,
    outgoing_links: Vec<Arc<Link>>,
    incoming_links: Vec<Arc<Link>>,
}

impl Network {
    pub(crate) fn new(id: NetworkId, bandwidth_down: u64, bandwidth_up: u64) -> Self {
        Self {
            id,
            bandwidth_down,
            bandwidth_up,
            outgoing_links: Vec::new(),
            incoming_links: Vec::new(),
        }
    }

    pub(crate) fn add_outgoing_link(&mut self, link: Arc<Link>) {
        debug_assert_eq!(link.source(), self.id);
        self.outgoing_links.push(link);
    }

    pub(crate) fn add_incoming_link(&mut self, link: Arc<Link>) {
        debug_assert_eq!(link.destination(), self.id);
        self.incoming_links.push(link);
    }

    pub fn id(&self) -> NetworkId {
        self.id
    }

    /// Downstream bandwidth in KiB/s
    pub fn bandwidth_down(&self) -> u64 {
        self.bandwidth_down
    }

    /// Upstream bandwidth in KiB/s
    pub fn bandwidth_up(&self) -> u64 {
        self.bandwidth_up
    }

    pub fn outgoing_links(&self) -> impl Iterator<Item = &Link> {
        self.outgoing_links.iter().map(Arc::as_ref)
    }

    pub fn incoming_links(&self) -> impl Iterator<Item = &Link> {
        self.incoming_links.iter().map(Arc::as_ref)
    }

    /// The link consulted for traffic toward `destination`.
    ///
    /// Parallel links to the same destination are allowed; the first one
    /// added wins.
    pub fn link_to(&self, destination: NetworkId) -> Option<&Link> {
        self.outgoing_links()
            .find(|link| link.destination() == destination)
    }

    fn route_to(&self, destination: NetworkId) -> Result<&Link> {
        self.link_to(destination).ok_or(TopologyError::NoRoute {
            from: self.id,
            to: destination,
        })
    }

    /// Latency toward `destination` at the given percentile
    pub fn link_latency(
        &self,
        destination: NetworkId,
        percentile: f64,
        model: &dyn LinkModel,
    ) -> Result<Duration> {
        Ok(model.latency(self.route_to(destination)?, percentile))
    }

    /// Delivery probability toward `destination`
    pub fn link_reliability(&self, destination: NetworkId, model: &dyn LinkModel) -> Result<f64> {
        Ok(model.reliability(self.route_to(destination)?))
    }

    /// Latency toward `destination` at a randomly drawn percentile
    pub fn sample_link_latency<R: RandomSource + ?Sized>(
        &self,
        destination: NetworkId,
        model: &dyn LinkModel,
        rng: &mut R,
    ) -> Result<Duration> {
        let link = self.route_to(destination)?;
        Ok(model.latency(link, rng.next_uniform_double()))
    }
}
