//! Recipebook core - client library for the recipe catalog API.
//!
//! This crate holds everything the front ends share:
//!
//! - `auth`: the session manager, its provider scope, and token storage
//! - `api`: the REST client for the identity and catalog endpoints
//! - `models`: users, recipes, seasons and the other catalog records
//! - `navigation`: routes and the `Navigator` seam
//! - `views`: view models for the navigation bar, recipe cards and pages
//! - `config`: user configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod navigation;
pub mod utils;
pub mod views;

pub use api::{ApiClient, ApiError};
pub use auth::{use_auth, AuthContext, AuthError, AuthProvider, AuthState, SessionManager};
pub use config::Config;
pub use navigation::{History, Navigator, Route};
