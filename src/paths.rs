//! Path resolution for rfstore
//!
//! # Environment Variables
//!
//! - `RFSTORE_CONFIG_DIR` - Override config directory (e.g., `~/dotfiles/rfstore`)
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `RFSTORE_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/rfstore` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\rfstore`
//!    - macOS: `~/Library/Application Support/rfstore`
//!    - Linux: `~/.config/rfstore`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "RFSTORE_CONFIG_DIR";

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Get the rfstore config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("rfstore");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    let base = dirs::config_dir().context("Could not determine config directory")?;
    let path = base.join("rfstore");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Get the config file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
