//! Authentication module for managing the user session and its token.
//!
//! This module provides:
//! - `SessionManager`: login, registration, logout and session hydration
//! - `AuthProvider` / `use_auth`: scoped access to the session for consumers
//! - `TokenStore`: durable token storage (file, OS keychain, or memory)
//! - `IdentityApi`: the remote identity service seam
//!
//! The session exists only while the stored token is known to be valid.
//! Any failed validation clears both the session and the token.

pub mod context;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod session;
pub mod store;

pub use context::{use_auth, AuthContext, AuthProvider};
pub use credentials::KeyringTokenStore;
pub use error::{AuthError, ValidationError};
pub use identity::IdentityApi;
pub use session::{AuthState, SessionManager};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
