//! Domain layer for the MyMultimedia console session.
//!
//! Holds the session model, the collaborator traits the session manager
//! drives, the route table and client configuration. Nothing here performs I/O.

pub mod auth;
pub mod config;
pub mod error;
pub mod route;

// Re-export common error type
pub use error::{MymediaError, Result};
