//! Error types for obsmap operations.

use thiserror::Error;

/// Errors surfaced by obsmap operations.
///
/// Upstream failures (`Source`, `Geocode`) are expected during normal
/// operation; callers log them and fall back to the previous snapshot or a
/// placeholder value rather than aborting.
#[derive(Error, Debug)]
pub enum ObsmapError {
    /// Input that violates an API contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record source failed to deliver records.
    #[error("Record source error: {0}")]
    Source(String),

    /// A reverse-geocoding provider failed.
    #[error("Geocoding error: {0}")]
    Geocode(String),

    /// JSON serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias for obsmap operations.
pub type Result<T> = std::result::Result<T, ObsmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ObsmapError::InvalidInput("cell size must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: cell size must be positive");

        let err = ObsmapError::Source("connection refused".to_string());
        assert_eq!(err.to_string(), "Record source error: connection refused");
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err: ObsmapError = parse_err.into();
        assert!(matches!(err, ObsmapError::Serialization(_)));
    }
}
