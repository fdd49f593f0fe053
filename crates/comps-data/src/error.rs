//! Error types for data operations.

use std::sync::Arc;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error: {status} from {url}")]
    Http {
        /// Status code returned by the server
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rate limit error
    #[error("Rate limit exceeded while fetching {0}")]
    RateLimit(String),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Authentication handshake failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Error shared between callers waiting on the same cache entry
    #[error(transparent)]
    Shared(Arc<DataError>),
}

impl DataError {
    /// Short, stable tag describing the error class.
    ///
    /// Used to label per-ticker failures in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::Parse(_) | Self::Serialization(_) => "parse",
            Self::MissingData { .. } => "missing",
            Self::RateLimit(_) => "rate-limit",
            Self::InvalidSymbol(_) => "invalid-symbol",
            Self::Auth(_) => "auth",
            Self::Shared(inner) => inner.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::Http {
            status: 404,
            url: "https://example.com/x".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 404 from https://example.com/x");

        let err = DataError::MissingData {
            symbol: "AAPL".to_string(),
            reason: "empty result".to_string(),
        };
        assert_eq!(err.to_string(), "Missing data for AAPL: empty result");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(DataError::Parse("x".into()).kind(), "parse");
        assert_eq!(DataError::RateLimit("AAPL".into()).kind(), "rate-limit");
        assert_eq!(DataError::InvalidSymbol(String::new()).kind(), "invalid-symbol");

        let shared = DataError::Shared(Arc::new(DataError::Auth("no crumb".into())));
        assert_eq!(shared.kind(), "auth");
        assert_eq!(shared.to_string(), "Authentication failed: no crumb");
    }
}
