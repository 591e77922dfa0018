//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and applies environment overrides.

use crate::paths::MymediaPaths;
use crate::storage::AtomicTomlFile;
use mymedia_core::config::ClientConfig;
use mymedia_core::error::{MymediaError, Result};
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "MYMEDIA_API_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "MYMEDIA_REQUEST_TIMEOUT_SECS";

/// Resolves the effective client configuration.
///
/// Precedence: environment variables > `config.toml` > built-in defaults.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let config_path = MymediaPaths::new(base_dir).config_file()?;
        Ok(Self { config_path })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the configuration, reading the process environment for overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Loads the configuration with an injectable environment lookup.
    pub fn load_with_env<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = AtomicTomlFile::<ClientConfig>::new(self.config_path.clone());
        let mut config = match file.load()? {
            Some(config) => config,
            None => {
                tracing::debug!(
                    "No config at {}, using defaults",
                    self.config_path.display()
                );
                ClientConfig::default()
            }
        };

        if let Some(url) = env(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            config.api_base_url = url;
        }

        if let Some(raw) = env(ENV_REQUEST_TIMEOUT_SECS) {
            config.request_timeout_secs = raw.trim().parse().map_err(|_| {
                MymediaError::config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_REQUEST_TIMEOUT_SECS, raw
                ))
            })?;
        }

        // reqwest treats a zero timeout as already elapsed.
        if config.request_timeout_secs == 0 {
            return Err(MymediaError::config(format!(
                "request timeout must be at least 1 second (file {} or {})",
                self.config_path.display(),
                ENV_REQUEST_TIMEOUT_SECS
            )));
        }

        Ok(config)
    }

    /// Writes `config` to `config.toml`.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        AtomicTomlFile::new(self.config_path.clone()).store(config)?;
        Ok(())
    }
}
