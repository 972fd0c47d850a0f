use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::models::RegistrationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Request rejected ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Server error ({status}): {detail}")]
    ServerError { status: StatusCode, detail: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("Failed to store session token: {0:#}")]
    Credential(anyhow::Error),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data around
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// The service's `detail` message if the body carries one, else the
    /// (truncated) body itself.
    fn extract_detail(body: &str) -> String {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .map(|d| match d {
                Value::String(s) => s,
                other => other.to_string(),
            });
        match detail {
            Some(d) => Self::truncate_body(&d),
            None => Self::truncate_body(body.trim()),
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = Self::extract_detail(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized { detail },
            403 => ApiError::AccessDenied(detail),
            404 => ApiError::NotFound(detail),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError { status, detail },
            _ => ApiError::Rejected { status, detail },
        }
    }

    /// HTTP status of the response that caused this error, if there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::AccessDenied(_) => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS),
            ApiError::Rejected { status, .. } | ApiError::ServerError { status, .. } => {
                Some(*status)
            }
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Message suitable for showing to the user
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::Rejected { detail, .. }
            | ApiError::ServerError { detail, .. } => Some(detail.as_str()),
            ApiError::AccessDenied(detail) | ApiError::NotFound(detail) => Some(detail.as_str()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
