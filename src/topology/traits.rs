//! Interfaces consumed from the rest of the simulator.
//!
//! The registry stores topology facts only. Sampling, interface shaping,
//! randomness and application shutdown are supplied through these traits.

use std::fmt;
use std::time::Duration;

use rand::RngCore;

use super::host::Host;
use super::link::Link;
use super::network::Network;
use super::registry::TopologyRegistry;
use crate::identity::HostId;

/// Source of uniform draws, owned by the caller (one per worker)
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_uniform_double(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_uniform_double(&mut self) -> f64 {
        rand::Rng::gen::<f64>(self)
    }
}

/// Statistical model of a link between two networks
pub trait LinkModel: fmt::Debug + Send + Sync {
    /// Latency at `percentile` (0.0 to 1.0) of the link's distribution
    fn latency(&self, link: &Link, percentile: f64) -> Duration;

    /// Probability that a packet crossing the link is delivered
    fn reliability(&self, link: &Link) -> f64;
}

/// Latency spread uniformly over `[latency - jitter, latency + jitter]`,
/// delivery probability `1 - packet_loss`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JitterLinkModel;

impl LinkModel for JitterLinkModel {
    fn latency(&self, link: &Link, percentile: f64) -> Duration {
        let percentile = if percentile.is_nan() { 0.5 } else { percentile.clamp(0.0, 1.0) };
        let low = link.min_latency();
        let high = link.max_latency();
        let spread = (high - low).as_nanos();
        let offset = ((spread as f64 * percentile) as u128).min(spread);
        low.saturating_add(nanos_to_duration(offset)).min(high)
    }

    fn reliability(&self, link: &Link) -> f64 {
        1.0 - link.packet_loss()
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}

/// Per-host network interface with shaped throughput
pub trait NetworkInterface: fmt::Debug + Send + Sync {
    fn speed_up_kibps(&self) -> u64;
    fn speed_down_kibps(&self) -> u64;
}

/// Builds the interface object for a newly created host
pub trait InterfaceFactory: fmt::Debug + Send + Sync {
    fn create(
        &self,
        host: HostId,
        network: &Network,
        bandwidth_down: u64,
        bandwidth_up: u64,
    ) -> Box<dyn NetworkInterface>;
}

/// Interface reporting the bandwidth the host was configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedInterface {
    pub down_kibps: u64,
    pub up_kibps: u64,
}

impl NetworkInterface for ShapedInterface {
    fn speed_up_kibps(&self) -> u64 {
        self.up_kibps
    }

    fn speed_down_kibps(&self) -> u64 {
        self.down_kibps
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShapedInterfaceFactory;

impl InterfaceFactory for ShapedInterfaceFactory {
    fn create(
        &self,
        _host: HostId,
        _network: &Network,
        bandwidth_down: u64,
        bandwidth_up: u64,
    ) -> Box<dyn NetworkInterface> {
        Box::new(ShapedInterface {
            down_kibps: bandwidth_down,
            up_kibps: bandwidth_up,
        })
    }
}

/// Host shutdown hook run during teardown.
///
/// Called once per host before any topology storage is released, so the
/// implementation may still resolve addresses and network membership.
pub trait HostLifecycle {
    fn stop_applications(&mut self, host: &Host, topology: &TopologyRegistry);
}
