//! Session application service.
//!
//! The session manager is the state machine behind login, token restore and
//! logout. It is built from injected collaborators so that it can be driven in
//! isolation.

mod manager;

pub use manager::{LoginOutcome, SessionManager};
