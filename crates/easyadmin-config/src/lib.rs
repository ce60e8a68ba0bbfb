//! Easy Admin channel configuration.
//!
//! TOML-based configuration for both sides of the frame channel: the
//! host's origin allow-list and payload limits, and the client's trusted
//! host origin and call deadline. Every section has defaults so partial
//! configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ClientConfig, EasyAdminConfig, HostConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{load_from_path, load_from_str};
pub use validation::validate;

use easyadmin_common::ConfigError;

/// Convenience function to load config from the platform default path.
pub fn load_config() -> Result<EasyAdminConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &EasyAdminConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
