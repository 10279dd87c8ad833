use thiserror::Error;

/// Errors that can occur while encoding or decoding a blob column.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode a value to its stored form.
    #[error("Failed to encode {type_name}: {reason}")]
    EncodeFailed {
        type_name: &'static str,
        reason: String,
    },
    /// Failed to decode a stored blob back to a value.
    #[error("Failed to decode {type_name}: {reason}")]
    DecodeFailed {
        type_name: &'static str,
        reason: String,
    },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
