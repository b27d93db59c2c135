use async_trait::async_trait;

use crate::api::ApiError;
use crate::models::User;

/// The remote identity service the session manager talks to.
///
/// `ApiClient` is the production implementation.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Exchange credentials for an access token
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError>;

    /// Fetch the user that owns `token`
    async fn profile(&self, token: &str) -> Result<User, ApiError>;
}
