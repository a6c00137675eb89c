use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Topology description: networks, the links between them and their hosts
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    pub networks: Vec<NetworkConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    #[serde(default)]
    pub hosts: Vec<HostConfig>,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate general settings
        if let Some(level) = &self.general.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(ValidationError::InvalidGeneral(format!(
                    "unknown log_level '{}'",
                    level
                )));
            }
        }

        // Validate networks
        if self.networks.is_empty() {
            return Err(ValidationError::InvalidNetwork(
                "at least one network must be defined".to_string(),
            ));
        }
        let mut network_names = HashSet::new();
        for network in &self.networks {
            if network.name.is_empty() {
                return Err(ValidationError::InvalidNetwork(
                    "network name cannot be empty".to_string(),
                ));
            }
            if !network_names.insert(network.name.as_str()) {
                return Err(ValidationError::InvalidNetwork(format!(
                    "network '{}' is defined more than once",
                    network.name
                )));
            }
        }

        // Validate links
        for link in &self.links {
            for endpoint in [&link.source, &link.destination] {
                if !network_names.contains(endpoint.as_str()) {
                    return Err(ValidationError::InvalidLink(format!(
                        "link {} -> {} references unknown network '{}'",
                        link.source, link.destination, endpoint
                    )));
                }
            }
            if !(0.0..=1.0).contains(&link.packet_loss) {
                return Err(ValidationError::InvalidLink(format!(
                    "link {} -> {} has packet_loss {} outside [0, 1]",
                    link.source, link.destination, link.packet_loss
                )));
            }
        }

        // Validate hosts
        let mut hostnames = HashSet::new();
        for host in &self.hosts {
            if host.name.is_empty() {
                return Err(ValidationError::InvalidHost(
                    "host name cannot be empty".to_string(),
                ));
            }
            if host.quantity == 0 {
                return Err(ValidationError::InvalidHost(format!(
                    "host '{}' has quantity 0",
                    host.name
                )));
            }
            if !network_names.contains(host.network.as_str()) {
                return Err(ValidationError::InvalidHost(format!(
                    "host '{}' references unknown network '{}'",
                    host.name, host.network
                )));
            }
            for hostname in host.hostnames() {
                if !hostnames.insert(hostname.clone()) {
                    return Err(ValidationError::InvalidHost(format!(
                        "hostname '{}' is used more than once",
                        hostname
                    )));
                }
            }
        }

        Ok(())
    }

    /// Look up a network definition by name
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.iter().find(|network| network.name == name)
    }

    /// Total number of hosts after expanding quantities
    pub fn host_count(&self) -> usize {
        self.hosts.iter().map(|host| host.quantity as usize).sum()
    }
}

/// Settings that are not part of the topology itself
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GeneralConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Seed for random draws made by the command-line tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Host addresses are allocated starting right after this address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_base: Option<Ipv4Addr>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkConfig {
    pub name: String,
    /// KiB/s
    pub bandwidth_down: u64,
    /// KiB/s
    pub bandwidth_up: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinkConfig {
    pub source: String,
    pub destination: String,
    #[serde(with = "humantime_serde")]
    pub latency: Duration,
    #[serde(default, with = "humantime_serde")]
    pub jitter: Duration,
    #[serde(default)]
    pub packet_loss: f64,
    /// Also create the reverse link with the same parameters
    #[serde(default)]
    pub bidirectional: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HostConfig {
    pub name: String,
    pub network: String,
    /// Defaults to the network's downstream bandwidth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_down: Option<u64>,
    /// Defaults to the network's upstream bandwidth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_up: Option<u64>,
    /// CPU cycles per second
    #[serde(default)]
    pub compute: u64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl HostConfig {
    /// Hostnames this entry expands to: the name itself, or `name1..nameN`
    /// when more than one copy is requested.
    pub fn hostnames(&self) -> Vec<String> {
        if self.quantity == 1 {
            vec![self.name.clone()]
        } else {
            (1..=self.quantity)
                .map(|index| format!("{}{}", self.name, index))
                .collect()
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
    #[error("Invalid link configuration: {0}")]
    InvalidLink(String),
    #[error("Invalid host configuration: {0}")]
    InvalidHost(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SITES: &str = r#"
general:
  log_level: debug
  seed: 7
  address_base: "11.0.0.0"
networks:
  - name: N1
    bandwidth_down: 1000
    bandwidth_up: 500
  - name: N2
    bandwidth_down: 2000
    bandwidth_up: 1000
links:
  - source: N1
    destination: N2
    latency: 50ms
    jitter: 5ms
    packet_loss: 0.01
    bidirectional: true
hosts:
  - name: alice
    network: N1
    compute: 1000000
  - name: relay
    network: N2
    bandwidth_up: 250
    quantity: 3
"#;

    #[test]
    fn test_config_parsing() {
        let config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.general.seed, Some(7));
        assert_eq!(config.general.address_base, Some(Ipv4Addr::new(11, 0, 0, 0)));
        assert_eq!(config.links[0].latency, Duration::from_millis(50));
        assert_eq!(config.links[0].jitter, Duration::from_millis(5));
        assert!(config.links[0].bidirectional);
        assert_eq!(config.hosts[0].quantity, 1);
        assert_eq!(config.hosts[0].bandwidth_down, None);
        assert_eq!(config.hosts[1].bandwidth_up, Some(250));
        assert_eq!(config.host_count(), 4);
        assert_eq!(config.network("N2").unwrap().bandwidth_down, 2000);
    }

    #[test]
    fn test_link_defaults() {
        let yaml = r#"
networks:
  - { name: solo, bandwidth_down: 10, bandwidth_up: 10 }
links:
  - { source: solo, destination: solo, latency: 1ms }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.links[0].jitter, Duration::ZERO);
        assert_eq!(config.links[0].packet_loss, 0.0);
        assert!(!config.links[0].bidirectional);
        assert!(config.hosts.is_empty());
    }

    #[test]
    fn test_hostnames_expand_with_quantity() {
        let host = HostConfig {
            name: "relay".to_string(),
            network: "N1".to_string(),
            bandwidth_down: None,
            bandwidth_up: None,
            compute: 0,
            quantity: 3,
        };
        assert_eq!(host.hostnames(), vec!["relay1", "relay2", "relay3"]);

        let single = HostConfig { quantity: 1, ..host };
        assert_eq!(single.hostnames(), vec!["relay"]);
    }

    #[test]
    fn test_validation_errors() {
        let mut config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        config.links[0].destination = "N3".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidLink(_))));

        let mut config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        config.links[0].packet_loss = 1.5;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidLink(_))));

        let mut config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        config.networks.push(config.networks[0].clone());
        assert!(matches!(config.validate(), Err(ValidationError::InvalidNetwork(_))));

        let mut config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        config.networks.clear();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidNetwork(_))));

        let mut config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        config.hosts[0].network = "nowhere".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidHost(_))));

        // "relay2" collides with the second expanded relay
        let mut config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        config.hosts[0].name = "relay2".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidHost(_))));

        let mut config: Config = serde_yaml::from_str(TWO_SITES).unwrap();
        config.general.log_level = Some("chatty".to_string());
        assert!(matches!(config.validate(), Err(ValidationError::InvalidGeneral(_))));
    }
}
