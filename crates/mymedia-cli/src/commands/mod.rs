pub mod fetch;
pub mod route;
pub mod session;

use anyhow::{Context, Result};
use mymedia_application::SessionManager;
use mymedia_infrastructure::{ConfigService, FileTokenStore};
use mymedia_interaction::ApiClient;
use std::path::Path;
use std::sync::Arc;

/// Wiring shared by every command.
pub struct AppContext {
    pub session: SessionManager,
    pub api: ApiClient,
}

impl AppContext {
    /// Loads config, builds the collaborators and restores the session.
    pub async fn bootstrap(config_dir: Option<&Path>) -> Result<Self> {
        let config = ConfigService::new(config_dir)
            .and_then(|service| service.load())
            .context("Failed to load client configuration")?;

        let token_store =
            Arc::new(FileTokenStore::new(config_dir).context("Failed to locate token store")?);
        let api = ApiClient::new(&config).context("Failed to build API client")?;
        tracing::debug!("[Bootstrap] API base URL: {}", api.config().api_base_url);

        let shared = Arc::new(api.clone());
        let session = SessionManager::new(token_store, shared.clone(), shared);
        session.bootstrap().await;

        Ok(Self { session, api })
    }
}

/// Output mode selected on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Prints `value` as JSON, or `text` otherwise.
    pub fn emit<T: serde::Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}
