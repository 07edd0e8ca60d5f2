//! Cross-platform directory path resolution
//!
//! Resolves the platform-appropriate configuration directory:
//! - Linux/macOS: XDG Base Directory specification (~/.config)
//! - Windows: Known Folder API (AppData\Roaming)

use std::path::{Path, PathBuf};

/// Get the configuration directory path
///
/// Checks the SOLSYNC_CONFIG_DIR environment variable first, then falls
/// back to:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/solsync or ~/.config/solsync
/// - Windows: %APPDATA%\solsync\config
pub fn config_dir() -> PathBuf {
    std::env::var("SOLSYNC_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", "solsync")
                    .map(|dirs| dirs.config_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join("solsync"))
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                std::env::var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".config"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                    })
                    .join("solsync")
            }
        })
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
