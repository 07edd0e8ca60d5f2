//! Configuration loading logic
//!
//! Loads the root configuration file when it exists, applies environment
//! variable overrides on top, and falls back to built-in defaults otherwise.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{defaults, paths, schema::Config};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let mut config = Self::load_defaults();

        let root_path = paths::root_config_path();
        if root_path.exists() {
            config = Self::load_file(&root_path)?;
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &PathBuf) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Save the configuration to the root config file
    pub fn save_root(config: &Config) -> Result<()> {
        let dir = paths::config_dir();
        paths::ensure_dir(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = paths::root_config_path();
        let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
        std::fs::write(&path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// SOLSYNC_READ_ONLY and SOLSYNC_REFRESH_TIMEOUT_MS override their file
    /// counterparts; unparseable values are ignored.
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(value) = std::env::var("SOLSYNC_READ_ONLY") {
            if let Ok(read_only) = value.parse() {
                config.read_only = read_only;
            }
        }
        if let Ok(value) = std::env::var("SOLSYNC_REFRESH_TIMEOUT_MS") {
            if let Ok(timeout_ms) = value.parse() {
                config.refresh_timeout_ms = timeout_ms;
            }
        }
        config
    }
}
