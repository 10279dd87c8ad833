use thiserror::Error;

use crate::codec::CodecError;

/// Errors that can occur during cache store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<CodecError> for StoreError {
    fn from(err: CodecError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for cache store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while mapping a cached row to a domain value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A blob the domain type cannot do without is absent or malformed.
    #[error("{entity_type} {key} is missing required field `{field}`")]
    MissingField {
        entity_type: &'static str,
        key: String,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_not_found_display() {
        let error = StoreError::NotFound {
            entity_type: "QuarterlyInfo",
            id: "en-2024-01".to_string(),
        };
        assert_eq!(error.to_string(), "QuarterlyInfo not found: en-2024-01");
    }

    #[test]
    fn test_store_error_connection_failed_display() {
        let error = StoreError::ConnectionFailed("database is locked".to_string());
        assert_eq!(error.to_string(), "Connection failed: database is locked");
    }

    #[test]
    fn test_store_error_query_failed_display() {
        let error = StoreError::QueryFailed("no such table: lessons".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: lessons");
    }

    #[test]
    fn test_store_error_from_codec_error() {
        let codec_error = CodecError::EncodeFailed {
            type_name: "Style",
            reason: "boom".to_string(),
        };

        let error = StoreError::from(codec_error);

        assert_eq!(
            error,
            StoreError::Serialization("Failed to encode Style: boom".to_string())
        );
    }

    #[test]
    fn test_mapping_error_display() {
        let error = MappingError::MissingField {
            entity_type: "Lesson",
            key: "en-2024-01-01".to_string(),
            field: "days",
        };
        assert_eq!(
            error.to_string(),
            "Lesson en-2024-01-01 is missing required field `days`"
        );
    }
}
