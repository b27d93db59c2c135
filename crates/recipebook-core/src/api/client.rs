//! API client for the recipe catalog REST API.
//!
//! This module provides the `ApiClient` struct for the identity endpoints
//! (login, registration, profile) and for the read-only catalog endpoints
//! (recipes, seasons, celebrations, ethnicities).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::IdentityApi;
use crate::models::{Celebration, Ethnicity, Recipe, RecipeDetails, Season, Tip, User};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

const PROFILE_PATH: &str = "/profile";
const LOGIN_PATH: &str = "/login";
const REGISTER_PATH: &str = "/register";
const LOGOUT_PATH: &str = "/logout";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    #[serde(rename = "Username")]
    username: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// API client for the recipe catalog.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning a typed error with the
    /// server's message if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    // ===== Identity =====

    /// Exchange credentials for an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let url = self.url(LOGIN_PATH);
        debug!(url = %url, "Sending login request");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse login response: {}", e)))?;

        body.access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("Login response has no access_token".to_string()))
    }

    /// Create an account. The response body is not used; a session is
    /// established by logging in afterwards.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let url = self.url(REGISTER_PATH);
        debug!(url = %url, "Sending registration request");

        let response = self
            .client
            .post(&url)
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }

    /// Fetch the profile of the user that owns `token`.
    pub async fn profile(&self, token: &str) -> Result<User, ApiError> {
        let url = self.url(PROFILE_PATH);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse profile response: {}", e)))
    }

    /// Ask the server to block `token`. Local logout does not depend on this.
    pub async fn revoke(&self, token: &str) -> Result<(), ApiError> {
        let url = self.url(LOGOUT_PATH);

        let response = self.client.post(&url).bearer_auth(token).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Catalog =====

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(path);
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(&url)
                .query(query)
                .headers(self.auth_headers()?)
                .send()
                .await
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            // Out of retries, the 429 goes through check_response like any other error
            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
                && retries < MAX_RATE_LIMIT_RETRIES
            {
                retries += 1;
                warn!(url = %url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2; // Exponential backoff
                continue;
            }

            let response = Self::check_response(response).await?;
            return response
                .json()
                .await
                .with_context(|| format!("Failed to parse JSON response from {}", url));
        }
    }

    /// Fetch all recipes visible to the current user. Non-admins only
    /// see approved recipes; the server does the filtering.
    pub async fn fetch_recipes(&self) -> Result<Vec<Recipe>> {
        self.get("/recipes").await
    }

    pub async fn fetch_recipe(&self, recipe_id: i64) -> Result<Recipe> {
        self.get(&format!("/recipes/{}", recipe_id)).await
    }

    /// Search recipes by name keyword
    pub async fn search_recipes(&self, keyword: &str) -> Result<Vec<Recipe>> {
        self.get_with_query("/recipe/search", &[("keyword", keyword)]).await
    }

    /// Fetch a recipe with its steps, ingredients, tips and groupings
    pub async fn fetch_recipe_details(&self, recipe_id: i64) -> Result<RecipeDetails> {
        self.get(&format!("/recipe/{}/details", recipe_id)).await
    }

    pub async fn fetch_tips(&self, recipe_id: i64) -> Result<Vec<Tip>> {
        self.get(&format!("/recipes/{}/tips", recipe_id)).await
    }

    pub async fn fetch_seasons(&self) -> Result<Vec<Season>> {
        self.get("/seasons").await
    }

    pub async fn fetch_season(&self, season_id: i64) -> Result<Season> {
        self.get(&format!("/seasons/{}", season_id)).await
    }

    /// Fetch the recipes associated with a season
    pub async fn fetch_season_recipes(&self, season_id: i64) -> Result<Vec<Recipe>> {
        self.get(&format!("/seasons/{}/recipes", season_id)).await
    }

    pub async fn fetch_celebrations(&self) -> Result<Vec<Celebration>> {
        self.get("/celebrations").await
    }

    pub async fn fetch_ethnicities(&self) -> Result<Vec<Ethnicity>> {
        self.get("/ethnicities").await
    }
}

#[async_trait]
impl IdentityApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        ApiClient::login(self, email, password).await
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        ApiClient::register(self, username, email, password).await
    }

    async fn profile(&self, token: &str) -> Result<User, ApiError> {
        ApiClient::profile(self, token).await
    }
}
