//! Configuration system
//!
//! YAML configuration with built-in defaults and environment variable
//! overrides, resolved under the platform config directory.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;

/// Get a configuration value by key.
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "readOnly" => Ok(config.read_only.to_string()),
        "refreshTimeoutMs" => Ok(config.refresh_timeout_ms.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key.
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "readOnly" => {
            config.read_only = value.parse().context("readOnly must be 'true' or 'false'")?;
        }
        "refreshTimeoutMs" => {
            config.refresh_timeout_ms = value
                .parse()
                .context("refreshTimeoutMs must be a number of milliseconds")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "readOnly").unwrap(), "false");
        assert_eq!(
            get_config_value(&config, "refreshTimeoutMs").unwrap(),
            "15000"
        );
        assert!(get_config_value(&config, "unknown").is_err());
    }

    #[test]
    fn test_set_config_value() {
        let mut config = Config::default();
        set_config_value(&mut config, "readOnly", "true").unwrap();
        assert!(config.read_only);

        set_config_value(&mut config, "refreshTimeoutMs", "5000").unwrap();
        assert_eq!(config.refresh_timeout_ms, 5000);

        assert!(set_config_value(&mut config, "readOnly", "maybe").is_err());
        assert!(set_config_value(&mut config, "unknown", "1").is_err());
    }
}
