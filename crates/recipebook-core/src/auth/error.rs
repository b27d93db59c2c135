use thiserror::Error;

use crate::api::ApiError;

/// Message used when a rejected login carries no message of its own
pub const LOGIN_FAILED: &str = "Login failed";

/// Message used when a rejected registration carries no message of its own
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Why a stored token could not be turned into a session.
///
/// Every kind ends in a forced logout; the distinction is only there for
/// callers that want to tell "could not confirm identity" apart from
/// "identity rejected".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("could not reach the identity service: {0}")]
    Network(String),

    #[error("identity service rejected the token (status {0})")]
    Rejected(u16),

    #[error("identity service returned an unreadable profile: {0}")]
    Malformed(String),
}

impl From<&ApiError> for ValidationError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::NetworkError(e) => ValidationError::Network(e.to_string()),
            ApiError::InvalidResponse(msg) => ValidationError::Malformed(msg.clone()),
            ApiError::BadRequest { .. } => ValidationError::Rejected(400),
            ApiError::Unauthorized { .. } => ValidationError::Rejected(401),
            ApiError::AccessDenied { .. } => ValidationError::Rejected(403),
            ApiError::NotFound { .. } => ValidationError::Rejected(404),
            ApiError::Conflict { .. } => ValidationError::Rejected(409),
            ApiError::RateLimited { .. } => ValidationError::Rejected(429),
            ApiError::ServerError { .. } => ValidationError::Rejected(500),
            ApiError::Other { status, .. } => ValidationError::Rejected(*status),
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// The API refused the credentials or registration. The message is
    /// meant to be shown to the user as-is.
    #[error("{0}")]
    Rejected(String),

    /// The request did not complete or the response was unusable.
    #[error(transparent)]
    Api(ApiError),

    /// Credentials were accepted but the resulting session could not be
    /// confirmed. The session has already been cleared.
    #[error("Session could not be established: {0}")]
    Validation(#[from] ValidationError),

    #[error("Token storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AuthError {
    /// Classify a failed login/registration request. Server rejections
    /// carry their message or the given fallback; everything else is a
    /// generic failure.
    pub(crate) fn from_submission(err: ApiError, fallback: &str) -> Self {
        if err.is_rejection() {
            let message = err.server_message().unwrap_or(fallback).to_string();
            AuthError::Rejected(message)
        } else {
            AuthError::Api(err)
        }
    }

    /// The text to show the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected(msg) => msg.clone(),
            AuthError::Api(ApiError::NetworkError(_)) => {
                "Unable to connect to server. Check your internet connection.".to_string()
            }
            other => other.to_string(),
        }
    }
}
