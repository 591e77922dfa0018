//! Session domain model.
//!
//! `Session` is the in-memory record of authentication status. It carries no
//! behaviour beyond derived queries; transitions belong to the session
//! manager in the application layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::failure::AuthFailure;

/// Role assigned to a console account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    #[serde(rename = "creador")]
    Creator,
    #[serde(rename = "lector")]
    Reader,
    /// Any role this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Profile of the logged-in user, as issued by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub user_type: UserType,
    pub language: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

/// Email/password pair submitted by the login form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Never serialized, so printed outcomes do not leak the bearer token.
    #[serde(skip_serializing)]
    pub token: String,
    pub user: User,
    /// Server message key (e.g. `loginSuccess`), used by the view for messaging.
    pub message: String,
}

/// Coarse state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    /// Token restored from the store, profile not fetched.
    Restored,
    Authenticated,
}

/// Authentication state shared with the view layer.
///
/// Invariant: `is_authenticated` implies a non-empty `token`. The token is
/// left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub error: Option<AuthFailure>,
}

impl Session {
    /// The logged-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session rebuilt from a stored token, without profile.
    pub fn restored(token: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user: None,
            token: Some(token.into()),
            error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match (self.is_authenticated, &self.user) {
            (false, _) => SessionState::Anonymous,
            (true, None) => SessionState::Restored,
            (true, Some(_)) => SessionState::Authenticated,
        }
    }

    /// Whether the admin menu should be offered.
    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Same session with `error` dropped, for comparisons that ignore
    /// failure history.
    pub fn without_error(&self) -> Self {
        Self {
            error: None,
            ..self.clone()
        }
    }
}
