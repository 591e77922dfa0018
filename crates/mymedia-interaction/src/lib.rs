//! HTTP interaction with the MyMultimedia REST API.

pub mod api_client;
pub mod error;

pub use api_client::ApiClient;
pub use error::ApiError;
