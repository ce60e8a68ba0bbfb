//! Host-side channel configuration.

use easyadmin_common::{Origin, PayloadLimits};
use serde::{Deserialize, Serialize};

/// Origins trusted out of the box: the local dev server on both loopback
/// spellings, plus frames loaded from `file://`.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] =
    &["http://localhost:3000", "http://127.0.0.1:3000", "null"];

/// Host-side configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Origin the host document is served from.
    pub origin: Origin,
    /// Client origins whose calls are accepted. `"null"` admits
    /// origin-less (`file://`) frames.
    pub allowed_origins: Vec<Origin>,
    /// Maximum positional arguments per call (valid range: 0-1024).
    pub max_args: usize,
    /// Maximum argument nesting depth (valid range: 1-128).
    pub max_depth: usize,
    /// Maximum serialized payload size in bytes (valid range: 1-67108864).
    pub max_payload_bytes: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        let limits = PayloadLimits::default();
        Self {
            origin: Origin::new("http://localhost:3000"),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| Origin::new(*o))
                .collect(),
            max_args: limits.max_args,
            max_depth: limits.max_depth,
            max_payload_bytes: limits.max_bytes,
        }
    }
}

impl HostConfig {
    pub fn payload_limits(&self) -> PayloadLimits {
        PayloadLimits {
            max_args: self.max_args,
            max_depth: self.max_depth,
            max_bytes: self.max_payload_bytes,
        }
    }

    /// Whether calls from `origin` are accepted.
    pub fn is_origin_allowed(&self, origin: &Origin) -> bool {
        self.allowed_origins.contains(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_local_dev_and_file_frames() {
        let config = HostConfig::default();
        assert!(config.is_origin_allowed(&Origin::new("http://localhost:3000")));
        assert!(config.is_origin_allowed(&Origin::new("http://127.0.0.1:3000")));
        assert!(config.is_origin_allowed(&Origin::Opaque));
    }

    #[test]
    fn rejects_unlisted_origins() {
        let config = HostConfig::default();
        assert!(!config.is_origin_allowed(&Origin::new("https://evil.com")));
        assert!(!config.is_origin_allowed(&Origin::new("http://localhost:3001")));
        assert!(!config.is_origin_allowed(&Origin::new("http://localhost")));
    }

    #[test]
    fn payload_limits_mirror_fields() {
        let config = HostConfig {
            max_args: 4,
            max_depth: 3,
            max_payload_bytes: 512,
            ..HostConfig::default()
        };
        assert_eq!(
            config.payload_limits(),
            PayloadLimits {
                max_args: 4,
                max_depth: 3,
                max_bytes: 512
            }
        );
    }
}
