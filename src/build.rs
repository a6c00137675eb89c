//! Populate a topology registry from a validated [`Config`].

use log::info;

use crate::config::Config;
use crate::error::{Result, TopologyError};
use crate::identity::NetworkId;
use crate::ip::AddressAllocator;
use crate::topology::TopologyRegistry;

/// Build an unfrozen registry holding every network, link and host of `config`.
///
/// Host bandwidths left unset inherit the owning network's bandwidth.
pub fn build_topology(config: &Config) -> Result<TopologyRegistry> {
    let mut registry = match config.general.address_base {
        Some(base) => {
            info!("Allocating host addresses after {}", base);
            TopologyRegistry::with_allocator(AddressAllocator::starting_after(base))
        }
        None => TopologyRegistry::new(),
    };
    populate(&mut registry, config)?;
    Ok(registry)
}

/// Issue the construction calls for `config` against an existing registry
pub fn populate(registry: &mut TopologyRegistry, config: &Config) -> Result<()> {
    for network in &config.networks {
        registry.add_network(&network.name, network.bandwidth_down, network.bandwidth_up)?;
    }

    for link in &config.links {
        let source = lookup_network(registry, &link.source)?;
        let destination = lookup_network(registry, &link.destination)?;

        registry.connect_networks(source, destination, link.latency, link.jitter, link.packet_loss)?;
        if link.bidirectional && source != destination {
            registry.connect_networks(destination, source, link.latency, link.jitter, link.packet_loss)?;
        }
    }

    for host in &config.hosts {
        let network_id = lookup_network(registry, &host.network)?;
        let network = config
            .network(&host.network)
            .ok_or_else(|| TopologyError::UnknownNetworkName(host.network.clone()))?;
        let bandwidth_down = host.bandwidth_down.unwrap_or(network.bandwidth_down);
        let bandwidth_up = host.bandwidth_up.unwrap_or(network.bandwidth_up);

        for hostname in host.hostnames() {
            registry.add_host(&hostname, network_id, bandwidth_down, bandwidth_up, host.compute)?;
        }
    }

    info!(
        "Built topology: {} networks, {} links, {} hosts",
        registry.network_count(),
        registry.links().count(),
        registry.host_count()
    );
    Ok(())
}

fn lookup_network(registry: &TopologyRegistry, name: &str) -> Result<NetworkId> {
    registry
        .network_id(name)
        .filter(|&id| registry.get_network(id).is_some())
        .ok_or_else(|| TopologyError::UnknownNetworkName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::parse_config;
    use crate::ip::Address;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    const TOPOLOGY: &str = r#"
general:
  address_base: "10.0.0.0"
networks:
  - { name: N1, bandwidth_down: 1000, bandwidth_up: 500 }
  - { name: N2, bandwidth_down: 2000, bandwidth_up: 1000 }
links:
  - { source: N1, destination: N2, latency: 50ms, jitter: 5ms, packet_loss: 0.01, bidirectional: true }
  - { source: N1, destination: N1, latency: 2ms, bidirectional: true }
hosts:
  - { name: alice, network: N1 }
  - { name: relay, network: N2, bandwidth_up: 64, quantity: 2 }
"#;

    #[test]
    fn test_build_topology() {
        let config = parse_config(TOPOLOGY).unwrap();
        let registry = build_topology(&config).unwrap();

        assert_eq!(registry.network_count(), 2);
        // The self-link is not doubled
        assert_eq!(registry.links().count(), 3);
        assert_eq!(registry.host_count(), 3);
        assert!(!registry.is_frozen());

        let alice = registry.host_id("alice").unwrap();
        let alice = registry.get_host(alice).unwrap();
        assert_eq!(alice.address(), Address::from(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(alice.bandwidth_down(), 1000);
        assert_eq!(alice.bandwidth_up(), 500);

        let relay = registry.get_host(registry.host_id("relay2").unwrap()).unwrap();
        assert_eq!(relay.bandwidth_down(), 2000);
        assert_eq!(relay.bandwidth_up(), 64);

        let bounds = registry.global_latency_bounds().unwrap();
        assert_eq!(bounds.min, Duration::from_millis(2));
        assert_eq!(bounds.max, Duration::from_millis(55));
    }

    #[test]
    fn test_populate_with_unknown_network_name() {
        // Skips validation on purpose
        let mut config: Config = serde_yaml::from_str(TOPOLOGY).unwrap();
        config.links[0].destination = "N9".to_string();

        let mut registry = TopologyRegistry::new();
        assert_eq!(
            populate(&mut registry, &config),
            Err(TopologyError::UnknownNetworkName("N9".to_string()))
        );
        assert!(registry.network_id("N9").is_none());
    }
}
