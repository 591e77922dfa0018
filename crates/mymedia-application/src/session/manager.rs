use mymedia_core::auth::{
    AuthApi, AuthFailure, CredentialSink, Credentials, LoginResponse, Session, SessionState,
    TokenStore,
};
use mymedia_core::error::{MymediaError, Result};
use mymedia_core::route::{Route, RouteDecision, RouteGuard};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::language::LanguageState;

/// Result of a login attempt as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// Authenticated. Carries the full response for messaging and redirects.
    Success(LoginResponse),
    /// Not authenticated. The same payload is stored in `Session::error`.
    Failure(AuthFailure),
    /// Another login was still in flight; nothing changed.
    Ignored,
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Owns the [`Session`] and performs every transition into and out of the
/// authenticated state.
///
/// `SessionManager` is the single writer of:
/// - the session itself
/// - the persisted token (through [`TokenStore`])
/// - the outgoing request credentials (through [`CredentialSink`])
///
/// Everything else reads the session through [`SessionManager::snapshot`] and
/// friends, which never suspend.
pub struct SessionManager {
    session: RwLock<Session>,
    token_store: Arc<dyn TokenStore>,
    auth_api: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialSink>,
    language: LanguageState,
    login_in_flight: AtomicBool,
    bootstrapped: AtomicBool,
}

impl SessionManager {
    /// Creates an anonymous manager. Call [`SessionManager::bootstrap`] once
    /// at startup to restore a stored token.
    pub fn new(
        token_store: Arc<dyn TokenStore>,
        auth_api: Arc<dyn AuthApi>,
        credentials: Arc<dyn CredentialSink>,
    ) -> Self {
        Self {
            session: RwLock::new(Session::anonymous()),
            token_store,
            auth_api,
            credentials,
            language: LanguageState::new(),
            login_in_flight: AtomicBool::new(false),
            bootstrapped: AtomicBool::new(false),
        }
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Restores the session from the token store.
    ///
    /// With a stored token the session becomes authenticated without a user
    /// profile and the token is configured as outgoing credentials. Only the
    /// first call does anything; later calls return the current session.
    pub async fn bootstrap(&self) -> Session {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return self.snapshot();
        }

        let token = match self.token_store.load().await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                tracing::info!("[Session] No stored token, starting anonymous");
                return self.snapshot();
            }
            Err(e) => {
                tracing::warn!("[Session] Failed to read token store, starting anonymous: {}", e);
                return self.snapshot();
            }
        };

        if let Err(e) = self.credentials.configure_credentials(&token) {
            // An unusable stored token is dropped so store and memory agree.
            tracing::warn!("[Session] Discarding stored token: {}", e);
            if let Err(e) = self.token_store.clear().await {
                tracing::warn!("[Session] Failed to clear token store: {}", e);
            }
            return self.snapshot();
        }

        *self.write_session() = Session::restored(token);
        tracing::info!("[Session] Restored session from stored token");
        self.snapshot()
    }

    /// Attempts to log in with `email` and `password`.
    ///
    /// On success the token is persisted, configured as outgoing credentials
    /// and the session gets the user profile; `error` is cleared and the UI
    /// language follows the user's profile. On failure only `error` changes.
    /// A call made while another login is in flight returns
    /// [`LoginOutcome::Ignored`].
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let Some(_in_flight) = InFlight::try_begin(&self.login_in_flight) else {
            tracing::warn!("[Session] Login already in progress, ignoring new attempt");
            return LoginOutcome::Ignored;
        };

        let credentials = Credentials::new(email, password);
        tracing::info!("[Session] Login attempt for {}", credentials.email);

        let response = match self.auth_api.login(&credentials).await {
            Ok(response) if response.token.is_empty() => {
                return self.fail_login(AuthFailure::malformed("login response has no token"));
            }
            Ok(response) => response,
            Err(failure) => return self.fail_login(failure),
        };

        let previous_token = self.read_session().token.clone();

        if let Err(e) = self.token_store.save(&response.token).await {
            return self.fail_login(AuthFailure::storage(e.to_string()));
        }

        if let Err(e) = self.credentials.configure_credentials(&response.token) {
            self.restore_store(previous_token).await;
            return self.fail_login(AuthFailure::malformed(e.to_string()));
        }

        {
            let mut session = self.write_session();
            session.is_authenticated = true;
            session.user = Some(response.user.clone());
            session.token = Some(response.token.clone());
            session.error = None;
        }
        self.language.set(&response.user.language);

        tracing::info!(
            "[Session] Logged in as {} ({:?})",
            response.user.username,
            response.user.user_type
        );
        LoginOutcome::Success(response)
    }

    /// Installs `token` as the session credential.
    ///
    /// Persists it, configures it for outgoing requests and marks the session
    /// authenticated. `user` and `error` are left untouched.
    pub async fn install_token(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(MymediaError::validation("token must not be empty"));
        }

        let previous_token = self.read_session().token.clone();
        self.token_store.save(token).await?;

        if let Err(e) = self.credentials.configure_credentials(token) {
            self.restore_store(previous_token).await;
            return Err(e);
        }

        {
            let mut session = self.write_session();
            session.token = Some(token.to_string());
            session.is_authenticated = true;
        }
        tracing::info!("[Session] Token installed");
        Ok(())
    }

    /// Returns the session to anonymous.
    ///
    /// Memory and outgoing credentials are always cleared. Removing the stored
    /// token is retried once; if it still fails the error is returned and the
    /// token stays on disk, so the next [`SessionManager::bootstrap`] restores
    /// it. Calling it while already anonymous is harmless.
    pub async fn logout(&self) -> Result<()> {
        let was_authenticated = {
            let mut session = self.write_session();
            let was_authenticated = session.is_authenticated;
            *session = Session::anonymous();
            was_authenticated
        };
        self.credentials.clear_credentials();

        if let Err(e) = self.token_store.clear().await {
            tracing::warn!("[Session] Failed to remove stored token, retrying: {}", e);
            if let Err(e) = self.token_store.clear().await {
                tracing::warn!("[Session] Stored token left in place: {}", e);
                return Err(e);
            }
        }

        if was_authenticated {
            tracing::info!("[Session] Logged out");
        }
        Ok(())
    }

    /// Reaction to an API call rejected with 401: logs out if authenticated.
    pub async fn on_unauthorized(&self) -> Result<()> {
        if !self.is_authenticated() {
            return Ok(());
        }
        tracing::info!("[Session] Credentials rejected by the API, logging out");
        self.logout().await
    }

    // ============================================================================
    // Read API
    // ============================================================================

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.read_session().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_authenticated
    }

    pub fn state(&self) -> SessionState {
        self.read_session().state()
    }

    /// Route guard decision for `route` against the current session.
    pub fn check_route(&self, route: &Route) -> RouteDecision {
        RouteGuard::check(&self.read_session(), route)
    }

    pub fn is_login_in_flight(&self) -> bool {
        self.login_in_flight.load(Ordering::SeqCst)
    }

    pub fn language(&self) -> String {
        self.language.get()
    }

    pub fn set_language(&self, language: &str) {
        self.language.set(language);
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn fail_login(&self, failure: AuthFailure) -> LoginOutcome {
        tracing::warn!("[Session] Login failed: {}", failure);
        self.write_session().error = Some(failure.clone());
        LoginOutcome::Failure(failure)
    }

    /// Puts the store back to `previous` after a transition was abandoned.
    async fn restore_store(&self, previous: Option<String>) {
        let result = match previous {
            Some(token) => self.token_store.save(&token).await,
            None => self.token_store.clear().await,
        };
        if let Err(e) = result {
            tracing::warn!("[Session] Failed to restore token store: {}", e);
        }
    }

    fn read_session(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a login as in flight until dropped.
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn try_begin(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
