//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for
//! serialization.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::REFRESH_TIMEOUT;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Disable modification operations (environment creation)
    #[serde(default)]
    pub read_only: bool,

    /// Delay between two refresh loop iterations, in milliseconds
    #[serde(default = "default_refresh_timeout_ms")]
    pub refresh_timeout_ms: u64,
}

impl Config {
    /// The refresh delay as a `Duration`.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_only: false,
            refresh_timeout_ms: default_refresh_timeout_ms(),
        }
    }
}

fn default_refresh_timeout_ms() -> u64 {
    REFRESH_TIMEOUT.as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("readOnly: true").unwrap();
        assert!(config.read_only);
        assert_eq!(config.refresh_timeout_ms, 15_000);
    }

    #[test]
    fn test_refresh_interval_conversion() {
        let config: Config = serde_yaml::from_str("refreshTimeoutMs: 2500").unwrap();
        assert_eq!(config.refresh_interval(), Duration::from_millis(2500));
    }
}
