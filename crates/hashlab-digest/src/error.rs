use std::io;

use crate::encoding::TextEncoding;

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("text cannot be encoded as {encoding} (char {position})")]
    EncodingError {
        encoding: TextEncoding,
        position: usize,
    },

    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("failed to read input: {0}")]
    SourceReadError(#[source] io::Error),

    #[error("pepper is required but not configured")]
    MissingPepper,

    #[error("HMAC key is required but not configured")]
    MissingKey,

    #[error("hashing cancelled after {bytes_processed} bytes")]
    Cancelled { bytes_processed: u64 },

    #[error("chunk size must be at least one byte")]
    InvalidChunkSize,

    #[error("salt length must be between 1 and {max} bytes, got {length}")]
    InvalidSaltLength { length: usize, max: usize },

    #[error("salt must not be empty")]
    EmptySalt,

    #[error("salt is not valid base64: {0}")]
    InvalidSalt(#[source] base64::DecodeError),

    #[error("invalid {algorithm} digest: {reason}")]
    InvalidDigest {
        algorithm: &'static str,
        reason:    String,
    },
}

impl DigestError {
    /// True for failures caused by the input source rather than by the caller's setup.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DigestError::EncodingError { .. }
                | DigestError::SourceReadError(_)
                | DigestError::Cancelled { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
