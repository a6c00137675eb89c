//! Serializable overview of a topology, used for reporting.

use serde::Serialize;

use super::registry::TopologyRegistry;
use crate::ip::Address;

#[derive(Debug, Clone, Serialize)]
pub struct TopologySummary {
    pub frozen: bool,
    pub networks: Vec<NetworkSummary>,
    pub links: Vec<LinkSummary>,
    pub hosts: Vec<HostSummary>,
    /// `[min, max]` in milliseconds
    pub latency_bounds_ms: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub name: String,
    pub bandwidth_down: u64,
    pub bandwidth_up: u64,
    pub outgoing_links: usize,
    pub incoming_links: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkSummary {
    pub source: String,
    pub destination: String,
    pub latency_ms: f64,
    pub jitter_ms: f64,
    pub packet_loss: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostSummary {
    pub name: String,
    pub network: String,
    pub address: Address,
    pub bandwidth_down: u64,
    pub bandwidth_up: u64,
    pub compute_capacity: u64,
}

fn millis(duration: std::time::Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

impl TopologySummary {
    pub fn of(registry: &TopologyRegistry) -> Self {
        let network_name = |id| registry.network_name(id).unwrap_or("?").to_string();

        let networks = registry
            .all_networks()
            .map(|network| NetworkSummary {
                name: network_name(network.id()),
                bandwidth_down: network.bandwidth_down(),
                bandwidth_up: network.bandwidth_up(),
                outgoing_links: network.outgoing_links().count(),
                incoming_links: network.incoming_links().count(),
            })
            .collect();

        let links = registry
            .links()
            .map(|link| LinkSummary {
                source: network_name(link.source()),
                destination: network_name(link.destination()),
                latency_ms: millis(link.latency()),
                jitter_ms: millis(link.jitter()),
                packet_loss: link.packet_loss(),
            })
            .collect();

        let mut hosts: Vec<HostSummary> = registry
            .all_hosts()
            .map(|host| HostSummary {
                name: host.hostname().to_string(),
                network: network_name(host.network_id()),
                address: host.address(),
                bandwidth_down: host.bandwidth_down(),
                bandwidth_up: host.bandwidth_up(),
                compute_capacity: host.compute_capacity(),
            })
            .collect();
        hosts.sort_by_key(|host| host.address);

        Self {
            frozen: registry.is_frozen(),
            networks,
            links,
            hosts,
            latency_bounds_ms: registry
                .global_latency_bounds()
                .map(|bounds| [millis(bounds.min), millis(bounds.max)]),
        }
    }
}
