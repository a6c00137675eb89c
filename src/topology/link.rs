//! Directed links between networks.

use std::time::Duration;

use crate::error::{Result, TopologyError};
use crate::identity::NetworkId;

/// Immutable directed edge between two networks
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    source: NetworkId,
    destination: NetworkId,
    latency: Duration,
    jitter: Duration,
    packet_loss: f64,
}

impl Link {
    /// Create a link. `packet_loss` must lie in `[0, 1]`.
    pub fn new(
        source: NetworkId,
        destination: NetworkId,
        latency: Duration,
        jitter: Duration,
        packet_loss: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&packet_loss) {
            return Err(TopologyError::InvalidLink(format!(
                "packet loss {} from {} to {} is outside [0, 1]",
                packet_loss, source, destination
            )));
        }

        Ok(Self {
            source,
            destination,
            latency,
            jitter,
            packet_loss,
        })
    }

    pub fn source(&self) -> NetworkId {
        self.source
    }

    pub fn destination(&self) -> NetworkId {
        self.destination
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn jitter(&self) -> Duration {
        self.jitter
    }

    pub fn packet_loss(&self) -> f64 {
        self.packet_loss
    }

    /// `latency + jitter`
    pub fn max_latency(&self) -> Duration {
        self.latency.saturating_add(self.jitter)
    }

    /// `latency - jitter`, clamped at zero
    pub fn min_latency(&self) -> Duration {
        self.latency.saturating_sub(self.jitter)
    }
}
