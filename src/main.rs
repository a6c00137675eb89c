use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use simnet_topology::build::build_topology;
use simnet_topology::config_loader;
use simnet_topology::topology::{Host, HostLifecycle, TopologyRegistry, TopologySummary};

/// Build a simulated network topology and answer queries against it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Hostname to resolve (may be repeated)
    #[arg(short, long)]
    resolve: Vec<String>,

    /// Print the topology summary as JSON
    #[arg(long)]
    json: bool,

    /// Number of random network draws to print
    #[arg(long, default_value_t = 0)]
    sample: usize,

    /// Seed for random draws, overriding the topology file
    #[arg(long)]
    seed: Option<u64>,
}

/// Logs every host as it is stopped
struct LoggingLifecycle;

impl HostLifecycle for LoggingLifecycle {
    fn stop_applications(&mut self, host: &Host, topology: &TopologyRegistry) {
        debug!(
            "Stopping host '{}' at {} on network {}",
            host.hostname(),
            host.address(),
            topology.network_name(host.network_id()).unwrap_or("?")
        );
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Topology file log level wins over the built-in default, RUST_LOG over both
    let default_level = config_loader::log_level_hint(&args.config).unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let config = config_loader::load_config(&args.config)?;

    let topology = build_topology(&config)
        .wrap_err_with(|| format!("Failed to build topology from '{}'", args.config.display()))?
        .seal();

    let summary = TopologySummary::of(&topology);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{} networks, {} links, {} hosts", summary.networks.len(), summary.links.len(), summary.hosts.len());
        match summary.latency_bounds_ms {
            Some([min, max]) => println!("global latency bounds: {:.3}ms .. {:.3}ms", min, max),
            None => println!("global latency bounds: none (no links)"),
        }
        for host in &summary.hosts {
            println!("  {:<20} {:<15} {}", host.name, host.address, host.network);
        }
    }

    for name in &args.resolve {
        match topology.resolve_hostname(name) {
            Some(address) => {
                let network = topology
                    .network_for_address(address)
                    .and_then(|network| topology.network_name(network.id()))
                    .unwrap_or("?");
                println!("{} -> {} ({})", name, address, network);
            }
            None => println!("{} -> unresolved", name),
        }
    }

    if args.sample > 0 {
        let seed = args.seed.or(config.general.seed).unwrap_or_default();
        let mut rng = StdRng::seed_from_u64(seed);
        info!("Drawing {} random networks with seed {}", args.sample, seed);
        for _ in 0..args.sample {
            let network = topology.pick_random_network(&mut rng)?;
            println!("{}", topology.network_name(network.id()).unwrap_or("?"));
        }
    }

    topology
        .teardown(&mut LoggingLifecycle)
        .map_err(|_| eyre!("Topology is still shared at teardown"))?;
    info!("Done");
    Ok(())
}
