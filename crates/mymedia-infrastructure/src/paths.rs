//! Path resolution for MyMultimedia client files.
//!
//! ```text
//! ~/.config/mymedia/
//! ├── config.toml     # ClientConfig
//! └── token.toml      # Persistent token store
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "mymedia";
const CONFIG_FILE: &str = "config.toml";
const TOKEN_FILE: &str = "token.toml";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for mymedia_core::MymediaError {
    fn from(e: PathError) -> Self {
        mymedia_core::MymediaError::config(e.to_string())
    }
}

/// Resolves client file locations, optionally under an explicit base directory.
#[derive(Debug, Clone, Default)]
pub struct MymediaPaths {
    base_dir: Option<PathBuf>,
}

impl MymediaPaths {
    /// Creates a resolver. `None` uses the platform config directory.
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// Token file. Written with owner-only permissions.
    pub fn token_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(TOKEN_FILE))
    }
}
