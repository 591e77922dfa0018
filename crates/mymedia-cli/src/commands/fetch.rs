use anyhow::{Result, bail};
use serde_json::Value;

use super::{AppContext, Output};

/// GETs an API path with the session's credentials and prints its `data`.
///
/// A 401 means the stored token expired: the session is logged out.
pub async fn get(app: &AppContext, output: Output, path: &str) -> Result<()> {
    match app.api.get_data::<Value>(path).await {
        Ok(data) => output.emit(&data, || data.to_string()),
        Err(err) if err.is_unauthorized() => {
            app.session.on_unauthorized().await?;
            bail!("{}: session expired, log in again", err)
        }
        Err(err) => Err(err.into()),
    }
}
