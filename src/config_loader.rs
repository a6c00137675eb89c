use crate::config::{Config, GeneralConfig};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Load, parse and validate a topology description from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading topology from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open topology file '{}'", config_path.display()))?;
    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse topology file '{}'", config_path.display()))?;

    config.validate()?;
    info!(
        "Topology describes {} networks, {} links and {} hosts",
        config.networks.len(),
        config.links.len(),
        config.host_count()
    );

    Ok(config)
}

/// Parse and validate a topology description held in memory
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content).wrap_err("Failed to parse topology")?;
    config.validate()?;
    Ok(config)
}

/// Log level requested by a topology file's `general` section.
///
/// Read before logging is set up, so failures are silent and left for
/// [`load_config`] to report.
pub fn log_level_hint(config_path: &Path) -> Option<String> {
    #[derive(Deserialize)]
    struct GeneralOnly {
        #[serde(default)]
        general: GeneralConfig,
    }

    let file = File::open(config_path).ok()?;
    let partial: GeneralOnly = serde_yaml::from_reader(file).ok()?;
    partial.general.log_level
}
