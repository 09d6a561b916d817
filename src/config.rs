use anyhow::{Context, Result, bail};
use redkit::client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::cli::ConnectionArgs;
use crate::paths;

/// Default number of parallel member fetches
pub const DEFAULT_JOBS: usize = 4;

// ============================================================================
// Config File
// ============================================================================

/// Contents of `config.toml`
///
/// ```toml
/// endpoint = "https://ilo-node1.example.com"
/// username = "admin"
/// password = "secret"
/// insecure = true
/// timeout_secs = 30
/// jobs = 8
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub insecure: bool,
    pub timeout_secs: Option<u64>,
    pub jobs: Option<usize>,
}

impl Config {
    /// Load config.toml from the config directory, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_file()?)
    }

    /// Load a config file, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file {} does not exist, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Combine the file with command-line and environment settings.
    ///
    /// Flags (and their environment variables) win over the file.
    pub fn client_config(&self, args: &ConnectionArgs) -> Result<ClientConfig> {
        let Some(endpoint) = args.endpoint.as_ref().or(self.endpoint.as_ref()) else {
            bail!(
                "No endpoint configured. Pass --endpoint, set RFSTORE_ENDPOINT, or add `endpoint` to {}",
                paths::CONFIG_FILE
            );
        };

        let mut config = ClientConfig::new(endpoint.as_str())
            .insecure(args.insecure || self.insecure);

        if let Some(username) = args.username.as_ref().or(self.username.as_ref()) {
            let password = args
                .password
                .as_ref()
                .or(self.password.as_ref())
                .map(String::as_str)
                .unwrap_or_default();
            config = config.credentials(username.as_str(), password);
        }

        if let Some(secs) = args.timeout.or(self.timeout_secs) {
            config = config.timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Number of parallel member fetches
    pub fn jobs(&self, args: &ConnectionArgs) -> usize {
        args.jobs.or(self.jobs).unwrap_or(DEFAULT_JOBS).max(1)
    }
}
