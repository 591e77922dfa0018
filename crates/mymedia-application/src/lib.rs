//! Application layer for the MyMultimedia console.
//!
//! Coordinates the domain session model with the token store, the login
//! endpoint and the outgoing request credentials.

pub mod language;
pub mod session;

pub use language::LanguageState;
pub use session::{LoginOutcome, SessionManager};
