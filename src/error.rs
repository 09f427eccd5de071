//! Portfolio API error types

/// Portfolio API error types.
///
/// `Clone` so that one deduplicated outcome can be handed to every caller
/// waiting on the same in-flight request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("JSON error: {0}")]
    Json(String),

    #[error("empty response body")]
    EmptyResponse,

    /// Client-side input check failed; no request was sent.
    #[error("validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Build a validation error for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the request itself (HTTP 4xx).
    ///
    /// Client errors are never retried: the same request will fail the same way.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Whether the error came from client-side validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }

    /// Whether retrying the same request could succeed.
    ///
    /// Network failures, 5xx responses and undecodable bodies are transient.
    /// Client errors, validation and configuration errors are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Http(_) | ApiError::Json(_) | ApiError::EmptyResponse => true,
            ApiError::Api { status, .. } => !(400..500).contains(status),
            ApiError::Validation { .. } | ApiError::Configuration(_) => false,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ApiError::Json(err.to_string())
        } else {
            ApiError::Http(err.to_string())
        }
    }
}

/// Result type alias for portfolio API operations
pub type Result<T> = std::result::Result<T, ApiError>;
