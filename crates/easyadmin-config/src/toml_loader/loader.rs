//! Core TOML config loading: read from path or platform default.

use crate::schema::EasyAdminConfig;
use crate::validation;
use easyadmin_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{create_default_config, default_config_path};

/// Parse and validate config from TOML text.
///
/// Missing fields take their serde defaults. A config that fails
/// validation is an error; it is never swapped for the defaults.
pub fn load_from_str(content: &str) -> Result<EasyAdminConfig, ConfigError> {
    let config: EasyAdminConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from a specific TOML file path.
pub fn load_from_path(path: &Path) -> Result<EasyAdminConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config = load_from_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/easyadmin/easyadmin.toml`
/// On Linux: `~/.config/easyadmin/easyadmin.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<EasyAdminConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(EasyAdminConfig::default())
        }
        Err(e) => Err(e),
    }
}
