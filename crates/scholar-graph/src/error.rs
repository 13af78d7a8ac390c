//! Error types for the researcher-graph pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations.

use std::time::Duration;

/// Errors from the profile-source HTTP boundary.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the profile source (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the source
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl SourceError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors surfaced by pipeline operations.
///
/// Single-record parse trouble never lands here: malformed affiliation or
/// interest text degrades that record to defaults and the run proceeds. A
/// batch fails only on invalid arguments at the call boundary, or when the
/// profile source produced no input at all.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The profile source could not be reached or returned no usable input.
    #[error("Profile source failure: {0}")]
    Source(#[from] SourceError),

    /// Input validation failed at the call boundary.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },
}

impl PipelineError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly message for CLI output.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Source(SourceError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by the profile source. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Source(SourceError::NotFound { resource }) => {
                format!("Not found: {resource}. Please check the ID is correct.")
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for profile-source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_retryable() {
        assert!(SourceError::rate_limited(60).is_retryable());
        assert!(SourceError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(SourceError::server(500, "Internal error").is_retryable());

        assert!(!SourceError::not_found("researcher123").is_retryable());
        assert!(!SourceError::bad_request("invalid query").is_retryable());
    }

    #[test]
    fn test_source_error_retry_after() {
        let err = SourceError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = SourceError::not_found("researcher");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_pipeline_error_user_message() {
        let err = PipelineError::validation("citations", "must be non-negative");
        assert!(err.user_message().contains("citations"));
        assert!(err.user_message().contains("must be non-negative"));

        let err = PipelineError::Source(SourceError::rate_limited(30));
        assert!(err.user_message().contains("wait"));
    }
}
