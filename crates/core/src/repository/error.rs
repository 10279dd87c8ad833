use thiserror::Error;

use crate::codec::CodecError;
use crate::storage::StoreError;

/// Errors surfaced by a quarterlies repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The cache could not serve the request and the refresh did not succeed.
    #[error("Failed to sync quarterly {index}: {reason}")]
    SyncFailed { index: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CodecError> for RepositoryError {
    fn from(err: CodecError) -> Self {
        RepositoryError::Store(err.into())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_failed_display() {
        let error = RepositoryError::SyncFailed {
            index: "en-2024-01".to_string(),
            reason: "Sync unavailable: offline".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Failed to sync quarterly en-2024-01: Sync unavailable: offline"
        );
    }

    #[test]
    fn test_from_codec_error_wraps_store_serialization() {
        let error = RepositoryError::from(CodecError::EncodeFailed {
            type_name: "QuarterlyGroup",
            reason: "boom".to_string(),
        });

        assert!(matches!(
            error,
            RepositoryError::Store(StoreError::Serialization(_))
        ));
    }
}
