//! REST API client module for the recipe catalog service.
//!
//! This module provides the `ApiClient` for the identity endpoints
//! (`/login`, `/register`, `/profile`) and the read-only catalog endpoints.
//!
//! The API uses JWT bearer token authentication; the token comes from
//! `/login` and is owned by the session manager.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
