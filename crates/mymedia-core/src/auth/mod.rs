//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `User` and login payload types
//! - `failure`: `AuthFailure`, the typed login failure payload
//! - `gateway`: traits for the token store, login endpoint and outgoing credentials

mod failure;
mod gateway;
mod model;

pub use failure::{AuthFailure, MALFORMED_RESPONSE, NETWORK_ERROR, STORAGE_ERROR};
pub use gateway::{AuthApi, CredentialSink, TOKEN_KEY, TokenStore};
pub use model::{Credentials, LoginResponse, Session, SessionState, User, UserType};
