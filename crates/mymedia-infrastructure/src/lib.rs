//! Infrastructure for the MyMultimedia console session: the persistent token
//! store, client configuration loading and path resolution.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod token_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::MymediaPaths;
pub use crate::token_store::{FileTokenStore, InMemoryTokenStore};
