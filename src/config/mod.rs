mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./cardforged.toml",
        "~/.config/cardforged/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let template = config.naming.template.trim();
    if template.is_empty() {
        anyhow::bail!("Naming template cannot be empty");
    }
    if !template.contains("NAME") {
        anyhow::bail!("Naming template '{}' must contain NAME", template);
    }

    if config.network.requests_per_second == 0 {
        anyhow::bail!("network.requests_per_second cannot be 0");
    }
    if config.network.timeout_secs == 0 {
        anyhow::bail!("network.timeout_secs cannot be 0");
    }

    if config.paths.mtgpics_dir == config.paths.scryfall_dir {
        tracing::warn!(
            "mtgpics_dir and scryfall_dir are both {:?}; images from both sources will share folders",
            config.paths.mtgpics_dir
        );
    }

    for (from, to) in &config.sets.replace {
        if to.trim().is_empty() {
            anyhow::bail!("Set replacement for '{}' is empty", from);
        }
    }

    Ok(())
}
