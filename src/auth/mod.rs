//! Auth session: the client-side notion of "who is logged in".
//!
//! State machine: `Initializing → {Authenticated(user) | Anonymous}`.
//!
//! - Startup reads the stored token; no token means `Anonymous` without a
//!   network call. A token the server rejects is cleared (the sole
//!   self-heal path — there is no silent refresh) and the failure is
//!   swallowed.
//! - `login` performs the token-granting call strictly before the
//!   current-user fetch; both complete before the future resolves.
//! - `register` creates the account and then runs the login sequence with
//!   the same credentials (the backend does not auto-authenticate).
//! - `logout` is synchronous and purely local.
//!
//! Transitions are serialized behind one async mutex so two concurrent
//! logins cannot interleave their token writes.

use crate::api::models::User;
use crate::api::ApiClient;
use crate::error::ApiError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Authentication state of the client process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Startup state, before the stored token has been checked.
    Initializing,
    Authenticated(User),
    Anonymous,
}

/// Derives a current-user value from the token slot, with deterministic
/// startup behavior. One instance per application shell.
pub struct AuthSession {
    api: Arc<ApiClient>,
    state: Mutex<AuthState>,
    /// Held across every auth transition, so at most one is in flight.
    transition: tokio::sync::Mutex<()>,
}

impl AuthSession {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(AuthState::Initializing),
            transition: tokio::sync::Mutex::new(()),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> AuthState {
        self.state.lock().clone()
    }

    /// Current user, when authenticated.
    pub fn user(&self) -> Option<User> {
        match &*self.state.lock() {
            AuthState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Resolve the startup state from the stored token.
    ///
    /// Never fails: a token the server rejects (expired, revoked, or a
    /// transport error) clears the session and lands on `Anonymous`.
    pub async fn bootstrap(&self) -> AuthState {
        let _guard = self.transition.lock().await;
        let next = match self.api.session().get() {
            None => AuthState::Anonymous,
            Some(_) => match self.api.current_user().await {
                Ok(user) => AuthState::Authenticated(user),
                Err(err) => {
                    tracing::debug!("stored token rejected, clearing session: {err}");
                    self.api.session().set(None);
                    AuthState::Anonymous
                }
            },
        };
        *self.state.lock() = next.clone();
        next
    }

    /// Log in, then resolve the current user, in that order.
    ///
    /// The token is persisted by the login call itself. If the follow-up
    /// current-user fetch fails, the token stays set and the state is left
    /// unchanged; the next bootstrap self-heals.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let _guard = self.transition.lock().await;
        self.login_sequence(email, password).await
    }

    /// Create an account, then log in with the same credentials.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let _guard = self.transition.lock().await;
        self.api.register(email, password).await?;
        self.login_sequence(email, password).await
    }

    /// Clear the session and become anonymous. No network call.
    pub fn logout(&self) {
        self.api.logout();
        *self.state.lock() = AuthState::Anonymous;
    }

    async fn login_sequence(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.api.login(email, password).await?;
        let user = self.api.current_user().await?;
        *self.state.lock() = AuthState::Authenticated(user.clone());
        Ok(user)
    }
}
