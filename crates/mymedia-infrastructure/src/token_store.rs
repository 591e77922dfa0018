//! Persistent token store implementations.

use crate::paths::MymediaPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use mymedia_core::auth::TokenStore;
use mymedia_core::error::{MymediaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// On-disk layout of `token.toml`. The field name is the store key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenRecord {
    token: String,
}

/// Token store backed by `token.toml` in the client config directory.
///
/// File I/O runs on the blocking pool; the async API never blocks the caller's
/// executor thread.
#[derive(Clone)]
pub struct FileTokenStore {
    file: Arc<AtomicTomlFile<TokenRecord>>,
}

impl FileTokenStore {
    /// Creates a store at the default location (or under `base_dir`).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let path = MymediaPaths::new(base_dir).token_file()?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn run_blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicTomlFile<TokenRecord>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| MymediaError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        let record = self.run_blocking(|file| Ok(file.load()?)).await?;
        Ok(record
            .map(|record| record.token)
            .filter(|token| !token.is_empty()))
    }

    async fn save(&self, token: &str) -> Result<()> {
        let record = TokenRecord {
            token: token.to_string(),
        };
        self.run_blocking(move |file| Ok(file.store(&record)?)).await?;
        tracing::debug!("Token persisted to {}", self.path().display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let removed = self.run_blocking(|file| Ok(file.remove()?)).await?;
        if removed {
            tracing::debug!("Token removed from {}", self.path().display());
        }
        Ok(())
    }
}

/// Process-local token store. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, as after a previous run.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}
