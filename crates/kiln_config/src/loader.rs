//! Configuration file loading and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::CacheConfig;

/// Loads and validates a `kiln.toml` configuration from a directory.
///
/// Reads `<dir>/kiln.toml`, parses it, and validates required fields.
pub fn load_config(dir: &Path) -> Result<CacheConfig, ConfigError> {
    let config_path = dir.join("kiln.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `kiln.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CacheConfig, ConfigError> {
    let config: CacheConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present.
fn validate_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.cache_dir.as_os_str().is_empty() {
        return Err(ConfigError::MissingField("cache_dir".to_string()));
    }
    Ok(())
}
