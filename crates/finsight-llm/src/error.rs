//! Error types for the LLM analysis crate

use thiserror::Error;

/// Errors that can occur when requesting analysis from the model provider
#[derive(Error, Debug)]
pub enum LlmError {
    /// HTTP request failed (network error or timeout)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API authentication failed
    #[error("Authentication failed - check your API key")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Non-success HTTP status with no structured error body
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider returned an error object inside the response body
    #[error("Provider error: {0}")]
    Provider(String),

    /// Response carried no choices to read a completion from
    #[error("No response from model")]
    EmptyResponse,

    /// Failed to parse the response body
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (missing API key, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input data was missing or empty
    #[error("No data: {0}")]
    NoData(String),
}

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LlmError::Config("OPENROUTER_API_KEY not set".to_string());
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));

        let err = LlmError::EmptyResponse;
        assert_eq!(err.to_string(), "No response from model");

        let err = LlmError::Provider("model overloaded".to_string());
        assert!(err.to_string().contains("model overloaded"));
    }
}
