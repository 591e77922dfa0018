//! Login failure payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message key used when no response reached the client.
pub const NETWORK_ERROR: &str = "networkError";
/// Message key for a 2xx login response the client cannot use.
pub const MALFORMED_RESPONSE: &str = "malformedResponse";
/// Message key for a token that could not be persisted.
pub const STORAGE_ERROR: &str = "storageError";

/// Why a login attempt did not authenticate.
///
/// Stored in `Session::error` and returned to the caller. Every variant
/// carries a message key the view layer can translate.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthFailure {
    /// Server answered with a non-2xx status.
    #[error("login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// No response reached the client.
    #[error("login request failed: {detail}")]
    Transport { message: String, detail: String },

    /// 2xx response without a usable token or user.
    #[error("malformed login response: {detail}")]
    MalformedResponse { message: String, detail: String },

    /// The token could not be persisted.
    #[error("token store unavailable: {detail}")]
    Storage { message: String, detail: String },
}

impl AuthFailure {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            message: NETWORK_ERROR.to_string(),
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: MALFORMED_RESPONSE.to_string(),
            detail: detail.into(),
        }
    }

    pub fn storage(detail: impl Into<String>) -> Self {
        Self::Storage {
            message: STORAGE_ERROR.to_string(),
            detail: detail.into(),
        }
    }

    /// The message key to show the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. }
            | Self::Transport { message, .. }
            | Self::MalformedResponse { message, .. }
            | Self::Storage { message, .. } => message,
        }
    }

    /// Whether the server itself refused the credentials.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
