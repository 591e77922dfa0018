use thiserror::Error;

/// Failure of an API call other than login.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response reached the client.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server no longer accepts the bearer token.
    #[error("not authorized")]
    Unauthorized,

    /// Any other non-2xx status.
    #[error("request rejected ({status}): {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
