//! Collaborators the session manager drives.
//!
//! The session manager is the only writer of the token store and of the
//! outgoing credentials. These traits make both of those writes explicit
//! calls instead of shared mutable defaults.

use async_trait::async_trait;

use super::failure::AuthFailure;
use super::model::{Credentials, LoginResponse};
use crate::error::Result;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Durable storage for the bearer token, surviving restarts.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reads the stored token, if any.
    async fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    async fn save(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<()>;
}

/// The remote login endpoint.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token and user profile.
    ///
    /// Never panics on network trouble; every failure is an [`AuthFailure`].
    async fn login(&self, credentials: &Credentials) -> std::result::Result<LoginResponse, AuthFailure>;
}

/// Credentials attached to every outgoing API request.
pub trait CredentialSink: Send + Sync {
    /// Configure outgoing-request credentials with `token`.
    fn configure_credentials(&self, token: &str) -> Result<()>;

    /// Clear outgoing-request credentials.
    fn clear_credentials(&self);
}
