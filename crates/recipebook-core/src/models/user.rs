//! The authenticated account, as returned by the profile endpoint.

use serde::{Deserialize, Serialize};

use super::Recipe;

/// Role string that grants admin views. There is no role hierarchy:
/// any other value is a regular user.
pub const ADMIN_ROLE: &str = "admin";

/// A user record.
///
/// The profile endpoint answers with `ID`/`Username`/`Email`/`Role`; older
/// payloads use `UserID` or lowercase names, which are accepted as aliases.
/// The record is replaced wholesale whenever the profile is fetched again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    #[serde(rename = "ID", alias = "id", alias = "UserID")]
    pub id: i64,
    #[serde(rename = "Username", alias = "username")]
    pub username: String,
    #[serde(rename = "Email", alias = "email")]
    pub email: String,
    #[serde(rename = "Role", alias = "role", default)]
    pub role: String,
    /// Recipes submitted by this user, included by `/profile`
    #[serde(
        rename = "Recipes",
        alias = "recipes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub recipes: Vec<Recipe>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
