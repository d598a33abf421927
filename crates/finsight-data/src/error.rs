//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum DataError {
    /// Network or HTTP transport error (including timeouts)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Unexpected HTTP status from the upstream API
    #[error("Unexpected status {status} from {provider}")]
    Status {
        provider: &'static str,
        status: u16,
    },

    /// Error reported inside an otherwise successful response body
    #[error("API error: {0}")]
    Api(String),

    /// Rate limit notice reported by the provider
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// JSON decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric field failed to parse
    #[error("Invalid number in field '{field}' at {key}: {value:?}")]
    InvalidNumber {
        key: String,
        field: &'static str,
        value: String,
    },

    /// No usable records in an otherwise valid response
    #[error("No data: {0}")]
    NoData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::RateLimited("5 calls per minute".to_string());
        assert_eq!(err.to_string(), "Rate limit exceeded: 5 calls per minute");

        let err = DataError::InvalidNumber {
            key: "2024-01-02".to_string(),
            field: "open",
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("open"));
        assert!(err.to_string().contains("2024-01-02"));
    }
}
