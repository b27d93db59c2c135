//! Sharing one session manager with every consumer of a front end.
//!
//! A front end wraps its body in `AuthProvider::mount`; inside that scope
//! any code can call `use_auth()` to get an `AuthContext`. Calling
//! `use_auth()` anywhere else is a bug and panics.
//!
//! The scope is a tokio task-local, so it covers the mounted future and
//! everything it awaits, but not tasks spawned from it.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::models::User;

use super::error::AuthError;
use super::session::{AuthState, SessionManager};

tokio::task_local! {
    static AUTH: AuthContext;
}

/// A consumer's handle on the session: read access plus the login,
/// register and logout operations. Cloning is cheap.
#[derive(Clone)]
pub struct AuthContext {
    manager: Arc<SessionManager>,
}

impl AuthContext {
    pub fn user(&self) -> Option<User> {
        self.manager.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.manager.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.manager.is_admin()
    }

    pub fn state(&self) -> AuthState {
        self.manager.state()
    }

    pub fn token(&self) -> Option<String> {
        self.manager.token()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.manager.subscribe()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.manager.login(email, password).await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), AuthError> {
        self.manager.register(username, email, password).await
    }

    pub fn logout(&self) {
        self.manager.logout()
    }
}

/// Owns the session manager for the lifetime of the application.
pub struct AuthProvider {
    context: AuthContext,
}

impl AuthProvider {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            context: AuthContext {
                manager: Arc::new(manager),
            },
        }
    }

    /// Restore any stored session, then run `children` with the session
    /// available through `use_auth()`.
    pub async fn mount<F>(self, children: F) -> F::Output
    where
        F: Future,
    {
        let context = self.context;
        let manager = Arc::clone(&context.manager);
        AUTH.scope(context, async move {
            manager.initialize().await;
            children.await
        })
        .await
    }
}

/// Get the session of the enclosing `AuthProvider`.
///
/// # Panics
///
/// Panics when called outside `AuthProvider::mount`.
pub fn use_auth() -> AuthContext {
    AUTH.try_with(AuthContext::clone)
        .unwrap_or_else(|_| panic!("use_auth must be used within an AuthProvider"))
}
