//! Client-side channel configuration.

use std::time::Duration;

use easyadmin_common::Origin;
use serde::{Deserialize, Serialize};

/// Client (embedded frame) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin the frame itself is served from.
    pub origin: Origin,
    /// The one host origin calls are sent to and responses accepted from.
    pub host_origin: Origin,
    /// Per-call deadline in milliseconds (valid range: 1-3600000).
    /// Unset means calls wait for their response indefinitely.
    pub call_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: Origin::new("http://localhost:3000"),
            host_origin: Origin::new("http://localhost:3000"),
            call_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_timeout_by_default() {
        assert_eq!(ClientConfig::default().call_timeout(), None);
    }

    #[test]
    fn timeout_in_millis() {
        let config = ClientConfig {
            call_timeout_ms: Some(1500),
            ..ClientConfig::default()
        };
        assert_eq!(config.call_timeout(), Some(Duration::from_millis(1500)));
    }
}
