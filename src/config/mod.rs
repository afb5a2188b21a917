mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to load config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./storefront.toml", "~/.config/storefront/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    config.store.validate()?;

    if let Some(base) = config.seed.base_time {
        storefront_db::seed::order_rows(base)?;
    }

    if config.query.customer_id.get() <= 0 {
        anyhow::bail!(
            "query.customer_id must be positive, got {}",
            config.query.customer_id
        );
    }

    if config.query.order_id.get() <= 0 {
        anyhow::bail!("query.order_id must be positive, got {}", config.query.order_id);
    }

    if !config.store.is_memory() {
        tracing::warn!(
            "store.path {:?} is a file; all writes are rolled back, nothing is kept",
            config.store.path
        );
    }

    Ok(())
}
