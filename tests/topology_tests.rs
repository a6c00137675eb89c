#[cfg(test)]
mod topology_tests {
    use std::collections::HashSet;
    use std::io::Write;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::NamedTempFile;

    use simnet_topology::build::build_topology;
    use simnet_topology::config_loader::load_config;
    use simnet_topology::identity::{HostId, NetworkId};
    use simnet_topology::ip::{Address, AddressAllocator};
    use simnet_topology::topology::{LatencyBounds, TopologyRegistry};
    use simnet_topology::TopologyError;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    /// Test the N1/N2 alice/bob scenario end to end
    #[test]
    fn test_two_network_scenario() {
        let mut registry = TopologyRegistry::new();
        let n1 = registry.intern_network("N1").unwrap();
        let n2 = registry.intern_network("N2").unwrap();
        registry.create_network(n1, 1000, 500).unwrap();
        registry.create_network(n2, 2000, 1000).unwrap();
        registry.connect_networks(n1, n2, ms(50), ms(5), 0.01).unwrap();

        let h1 = registry.intern_host("alice").unwrap();
        let h2 = registry.intern_host("bob").unwrap();
        let alice_address = registry.create_host(h1, n1, "alice", 1000, 500, 1_000_000).unwrap();
        let bob_address = registry.create_host(h2, n2, "bob", 2000, 1000, 1_000_000).unwrap();

        assert_eq!(
            registry.global_latency_bounds(),
            Some(LatencyBounds { min: ms(45), max: ms(55) })
        );
        assert_eq!(registry.resolve_hostname("alice"), Some(alice_address));
        assert_eq!(registry.get_host(h1).unwrap().address(), alice_address);
        assert_eq!(registry.network_for_address(bob_address).unwrap().id(), n2);
        assert_eq!(registry.resolve_address(bob_address), Some("bob"));

        let topology = registry.seal();
        assert!((topology.reliability(h1, h2).unwrap() - 0.99).abs() < 1e-12);
        assert_eq!(topology.latency(h1, h2, 0.0).unwrap(), ms(45));
        assert_eq!(topology.bandwidth_down(h2).unwrap(), 2000);
        assert_eq!(topology.bandwidth_up(h1).unwrap(), 500);
        // Only N1 -> N2 exists
        assert_eq!(
            topology.latency(h2, h1, 0.5),
            Err(TopologyError::NoRoute { from: n2, to: n1 })
        );
    }

    /// Test that the bounds equal (min(l - j), max(l + j)) over many links
    #[test]
    fn test_latency_bounds_over_random_links() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut registry = TopologyRegistry::new();
        let networks: Vec<NetworkId> = (0..5)
            .map(|index| registry.add_network(&format!("net{}", index), 100, 100).unwrap())
            .collect();

        let mut expected_min = Duration::MAX;
        let mut expected_max = Duration::ZERO;
        for _ in 0..200 {
            let latency = ms(rand::Rng::gen_range(&mut rng, 0..200));
            let jitter = ms(rand::Rng::gen_range(&mut rng, 0..50));
            let source = networks[rand::Rng::gen_range(&mut rng, 0..networks.len())];
            let destination = networks[rand::Rng::gen_range(&mut rng, 0..networks.len())];

            registry.connect_networks(source, destination, latency, jitter, 0.0).unwrap();
            expected_min = expected_min.min(latency.saturating_sub(jitter));
            expected_max = expected_max.max(latency + jitter);

            let bounds = registry.global_latency_bounds().unwrap();
            assert_eq!(bounds.min, expected_min);
            assert_eq!(bounds.max, expected_max);
        }
    }

    /// Test address uniqueness and the name/address bijection across many hosts
    #[test]
    fn test_bijection_across_many_hosts() {
        let mut registry =
            TopologyRegistry::with_allocator(AddressAllocator::starting_after(Ipv4Addr::new(126, 255, 255, 200)));
        let networks: Vec<NetworkId> = (0..3)
            .map(|index| registry.add_network(&format!("net{}", index), 100, 100).unwrap())
            .collect();

        let mut hosts: Vec<HostId> = Vec::new();
        for index in 0..500 {
            let network = networks[index % networks.len()];
            hosts.push(registry.add_host(&format!("host{}", index), network, 10, 10, 1).unwrap());
        }

        let mut seen = HashSet::new();
        for id in hosts {
            let host = registry.get_host(id).unwrap();
            assert!(!host.address().is_reserved());
            assert!(seen.insert(host.address()));

            let address = registry.resolve_hostname(host.hostname()).unwrap();
            assert_eq!(registry.resolve_address(address), Some(host.hostname()));
            assert_eq!(registry.resolve_hostname(registry.resolve_address(host.address()).unwrap()), Some(host.address()));
            assert_eq!(registry.network_for_address(address).unwrap().id(), host.network_id());
        }
        // The allocator walked across 127.0.0.1 without handing it out
        assert!(registry.resolve_address(Address::LOOPBACK).is_none());
        assert!(seen.contains(&Address::from(Ipv4Addr::new(127, 0, 0, 2))));
    }

    /// Test that frozen registries reject every construction call
    #[test]
    fn test_construction_after_freeze() {
        let mut registry = TopologyRegistry::new();
        let net = registry.add_network("net", 1, 1).unwrap();
        registry.freeze();
        registry.freeze();

        assert_eq!(registry.intern_host("late"), Err(TopologyError::AlreadyFrozen));
        assert_eq!(registry.add_host("late", net, 1, 1, 1), Err(TopologyError::AlreadyFrozen));
        assert!(registry.host_id("late").is_none());
        assert_eq!(registry.connect_networks(net, net, ms(1), ms(1), 0.0), Err(TopologyError::AlreadyFrozen));
        assert_eq!(registry.host_count(), 0);
        assert!(registry.global_latency_bounds().is_none());
    }

    /// Test random network selection with a seeded generator
    #[test]
    fn test_pick_random_network_covers_all_networks() {
        let mut registry = TopologyRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            registry.pick_random_network(&mut rng).map(|network| network.id()),
            Err(TopologyError::EmptyTopology)
        );

        for index in 0..4 {
            registry.add_network(&format!("net{}", index), 1, 1).unwrap();
        }
        let topology = registry.seal();

        let picked: HashSet<NetworkId> = (0..400)
            .map(|_| topology.pick_random_network(&mut rng).unwrap().id())
            .collect();
        assert_eq!(picked.len(), 4);
    }

    /// Test building a frozen topology straight from a topology file
    #[test]
    fn test_topology_from_file() {
        let yaml = r#"
general:
  address_base: "192.168.0.0"
networks:
  - { name: home, bandwidth_down: 10240, bandwidth_up: 1024 }
  - { name: cloud, bandwidth_down: 102400, bandwidth_up: 102400 }
links:
  - { source: home, destination: cloud, latency: 20ms, jitter: 2ms, packet_loss: 0.001, bidirectional: true }
hosts:
  - { name: laptop, network: home }
  - { name: web, network: cloud, quantity: 2 }
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        let topology = build_topology(&config).unwrap().seal();

        assert_eq!(topology.host_count(), 3);
        assert_eq!(
            topology.resolve_hostname("laptop"),
            Some(Address::from(Ipv4Addr::new(192, 168, 0, 1)))
        );

        let laptop = topology.host_id("laptop").unwrap();
        let web1 = topology.host_id("web1").unwrap();
        let web2 = topology.host_id("web2").unwrap();
        assert_eq!(topology.latency(laptop, web1, 0.5).unwrap(), topology.latency(laptop, web2, 0.5).unwrap());
        assert_eq!(topology.latency(web2, laptop, 1.0).unwrap(), ms(22));
        assert_eq!(topology.bandwidth_up(web1).unwrap(), 102400);
    }
}
