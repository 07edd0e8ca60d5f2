//! Configuration subcommand handling

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{ConfigLoader, get_config_value, paths, set_config_value};

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "readOnly", "refreshTimeoutMs")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "readOnly", "refreshTimeoutMs")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let mut config = ConfigLoader::load().unwrap_or_else(|_| ConfigLoader::load_defaults());

            set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save_root(&config).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
    }
    Ok(())
}
