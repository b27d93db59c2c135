use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::User;
use crate::navigation::{Navigator, Route};

use super::error::{AuthError, ValidationError, LOGIN_FAILED, REGISTRATION_FAILED};
use super::identity::IdentityApi;
use super::store::TokenStore;

/// What every consumer of the session sees.
///
/// The authorization flags are computed from `user` on each call rather
/// than stored, so they can never disagree with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(User::is_admin).unwrap_or(false)
    }
}

/// Owner of the current session and the persisted credential token.
///
/// All state changes go through `initialize`, `login`, `register` and
/// `logout`. Concurrent operations are not serialized: when two of them
/// race, whichever response arrives last decides the session.
pub struct SessionManager {
    api: Arc<dyn IdentityApi>,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<AuthState>,
    /// In-memory mirror of the stored token
    token: Mutex<Option<String>>,
}

impl SessionManager {
    pub fn new(
        api: Arc<dyn IdentityApi>,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            api,
            store,
            navigator,
            state,
            token: Mutex::new(None),
        }
    }

    /// Restore the session from a stored token, if there is one.
    ///
    /// Without a stored token nothing is requested. A token the identity
    /// service does not accept is discarded through `logout`.
    pub async fn initialize(&self) {
        let token = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token, starting logged out");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear unreadable token");
                }
                None
            }
        };

        match token {
            Some(token) => {
                debug!("Stored token found, hydrating session");
                *self.token_slot() = Some(token.clone());
                // Failure has already been resolved by logging out
                let _ = self.fetch_user(&token).await;
            }
            None => debug!("No stored token"),
        }
    }

    /// Turn `token` into a session. Any failure logs the user out.
    async fn fetch_user(&self, token: &str) -> Result<User, ValidationError> {
        match self.api.profile(token).await {
            Ok(user) => {
                info!(user_id = user.id, role = %user.role, "Session established");
                self.state.send_replace(AuthState {
                    user: Some(user.clone()),
                });
                Ok(user)
            }
            Err(e) => {
                let reason = ValidationError::from(&e);
                warn!(error = %e, ?reason, "Failed to fetch user profile, logging out");
                self.logout();
                Err(reason)
            }
        }
    }

    /// Log in with email and password, then load the user's profile and
    /// go to the home view.
    ///
    /// Credentials are sent as given; the API does the validation.
    ///
    /// A failed profile fetch is not swallowed: the session has already
    /// been logged out, and this returns `AuthError::Validation` without
    /// going home, so the caller ends up on the login view.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let token = self.api.login(email, password).await.map_err(|e| {
            warn!(error = %e, "Login failed");
            AuthError::from_submission(e, LOGIN_FAILED)
        })?;

        self.store.save(&token)?;
        *self.token_slot() = Some(token.clone());

        self.fetch_user(&token).await?;
        self.navigator.navigate(Route::Home);
        info!("Login successful");
        Ok(())
    }

    /// Create an account and log into it with the same credentials.
    ///
    /// Registration itself does not create a session; the outcome is that
    /// of the login that follows.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), AuthError> {
        self.api
            .register(username, email, password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Registration failed");
                AuthError::from_submission(e, REGISTRATION_FAILED)
            })?;

        info!(username = %username, "Registration accepted, logging in");
        self.login(email, password).await
    }

    /// Forget the token and the user and go to the login view.
    /// Safe to call when already logged out.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        *self.token_slot() = None;
        self.state.send_replace(AuthState::default());
        self.navigator.navigate(Route::Login);
        debug!("Logged out");
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// The bearer token for catalog requests, if logged in
    pub fn token(&self) -> Option<String> {
        self.token_slot().clone()
    }

    /// Receive every session change from now on
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn token_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}
