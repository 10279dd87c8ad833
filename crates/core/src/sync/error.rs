use thiserror::Error;

use crate::storage::StoreError;

/// Errors reported by a sync coordinator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No remote source is reachable.
    #[error("Sync unavailable: {0}")]
    Unavailable(String),
    #[error("Sync request failed: {0}")]
    RequestFailed(String),
    /// The remote answered with content that cannot be used.
    #[error("Invalid remote content: {0}")]
    InvalidContent(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
