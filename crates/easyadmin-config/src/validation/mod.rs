//! Full configuration validation.
//!
//! Checks origin syntax and numeric ranges for both sides of the channel,
//! collecting every problem into a single `ConfigError`.

mod helpers;
mod origins;


use crate::schema::EasyAdminConfig;
use easyadmin_common::ConfigError;

use helpers::validate_range;

pub use origins::is_valid_origin;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &EasyAdminConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    origins::validate_host_origins(&mut errors, &config.host);
    origins::validate_client_origins(&mut errors, &config.client);

    validate_range(&mut errors, "host.max_args", config.host.max_args, 0, 1024);
    validate_range(&mut errors, "host.max_depth", config.host.max_depth, 1, 128);
    validate_range(
        &mut errors,
        "host.max_payload_bytes",
        config.host.max_payload_bytes,
        1,
        64 * 1024 * 1024,
    );

    if let Some(ms) = config.client.call_timeout_ms {
        validate_range(&mut errors, "client.call_timeout_ms", ms, 1, 3_600_000);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
