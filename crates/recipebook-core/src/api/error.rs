use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {}", .message.as_deref().unwrap_or("no details"))]
    BadRequest { message: Option<String> },

    #[error("Unauthorized - token may be expired")]
    Unauthorized { message: Option<String> },

    #[error("Access denied: {}", .message.as_deref().unwrap_or("no details"))]
    AccessDenied { message: Option<String> },

    #[error("Resource not found: {}", .message.as_deref().unwrap_or("no details"))]
    NotFound { message: Option<String> },

    #[error("Conflict: {}", .message.as_deref().unwrap_or("no details"))]
    Conflict { message: Option<String> },

    #[error("Rate limited - please wait before retrying")]
    RateLimited { message: Option<String> },

    #[error("Server error: {}", .message.as_deref().unwrap_or("no details"))]
    ServerError { message: Option<String> },

    /// A non-2xx status with no dedicated variant
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Other { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// A 2xx response whose body could not be used
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies kept in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error payload shape used by the API (`abort(status, message=...)`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Pull the human-readable `message` out of an error body, if any.
    fn parse_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::parse_message(body);
        match status.as_u16() {
            400 | 422 => ApiError::BadRequest { message },
            401 => ApiError::Unauthorized { message },
            403 => ApiError::AccessDenied { message },
            404 => ApiError::NotFound { message },
            409 => ApiError::Conflict { message },
            429 => ApiError::RateLimited { message },
            500..=599 => ApiError::ServerError { message },
            code => {
                if message.is_none() && !body.is_empty() {
                    debug!(status = code, body = %Self::truncate_body(body), "Unmapped error status");
                }
                ApiError::Other { status: code, message }
            }
        }
    }

    /// The message the server attached to a rejection, verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { message }
            | ApiError::Unauthorized { message }
            | ApiError::AccessDenied { message }
            | ApiError::NotFound { message }
            | ApiError::Conflict { message }
            | ApiError::RateLimited { message }
            | ApiError::ServerError { message }
            | ApiError::Other { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when the server answered with a non-2xx status, as opposed to
    /// the request never completing or the body being unreadable.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            ApiError::NetworkError(_) | ApiError::InvalidResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_keeps_server_message() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message": "bad credentials"}"#);
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.server_message(), Some("bad credentials"));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_from_status_without_json_body() {
        let err = ApiError::from_status(StatusCode::CONFLICT, "<html>oops</html>");
        assert!(matches!(err, ApiError::Conflict { message: None }));
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "{}"),
            ApiError::BadRequest { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "{}"),
            ApiError::AccessDenied { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "{}"),
            ApiError::RateLimited { message: None }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "{}"),
            ApiError::ServerError { .. }
        ));
    }

    #[test]
    fn test_unmapped_status_is_still_a_rejection() {
        let err = ApiError::from_status(StatusCode::PAYMENT_REQUIRED, r#"{"message": "pay up"}"#);
        assert!(matches!(err, ApiError::Other { status: 402, .. }));
        assert_eq!(err.server_message(), Some("pay up"));
        assert!(err.is_rejection());

        let err = ApiError::from_status(StatusCode::IM_A_TEAPOT, "short and stout");
        assert!(matches!(err, ApiError::Other { status: 418, message: None }));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_rate_limit_keeps_message() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, r#"{"message": "slow down"}"#);
        assert_eq!(err.server_message(), Some("slow down"));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_empty_message_is_ignored() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message": ""}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.contains("truncated, 520 total bytes"));
        assert_eq!(ApiError::truncate_body("short"), "short");
    }
}
