//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid listener bind address {addr:?}: {reason}")]
    InvalidBindAddress { addr: String, reason: String },

    #[error("middletier address may not be empty")]
    EmptyMiddletierAddress,
}

/// Load configuration: defaults, then an optional TOML file, then
/// environment overrides, then validation.
///
/// `EDGE_LISTEN_ADDR_PORT` and `MIDDLETIER_ADDR_PORT` override the listener
/// and middletier addresses when set and non-empty.
pub fn load_config(path: Option<&Path>) -> Result<EdgeConfig, ConfigError> {
    let mut config = match path {
        Some(p) => parse_config(&fs::read_to_string(p)?)?,
        None => EdgeConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Parse a TOML document into a config.
pub fn parse_config(raw: &str) -> Result<EdgeConfig, ConfigError> {
    Ok(toml::from_str(raw)?)
}

fn apply_env_overrides(config: &mut EdgeConfig) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

/// Apply address overrides from a key/value source. Empty values count as
/// unset, matching how a blank environment variable behaves.
fn apply_overrides<F>(config: &mut EdgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(addr) = lookup("EDGE_LISTEN_ADDR_PORT").filter(|v| !v.is_empty()) {
        config.listener.bind_address = addr;
    }
    if let Some(addr) = lookup("MIDDLETIER_ADDR_PORT").filter(|v| !v.is_empty()) {
        config.middletier.address = addr;
    }
}

fn validate(config: &EdgeConfig) -> Result<(), ConfigError> {
    config
        .listener
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidBindAddress {
            addr: config.listener.bind_address.clone(),
            reason: e.to_string(),
        })?;

    if config.middletier.address.is_empty() {
        return Err(ConfigError::EmptyMiddletierAddress);
    }

    Ok(())
}
