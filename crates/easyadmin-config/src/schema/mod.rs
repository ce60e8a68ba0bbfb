//! Configuration schema types for the Easy Admin channel.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod client;
mod host;

pub use client::*;
pub use host::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration: one section per side of the channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasyAdminConfig {
    pub host: HostConfig,
    pub client: ClientConfig,
}
