//! Portable codec error types.

use thiserror::Error;

/// Result type for portable codec operations.
pub type PortableResult<T> = Result<T, PortableError>;

/// Errors that can occur in portable key and message operations.
#[derive(Debug, Error)]
pub enum PortableError {
    #[error("no secret provided for a locked key")]
    MissingSecret,

    #[error("no data to encrypt")]
    InvalidInput,

    #[error("private key unlock failed (wrong secret)")]
    UnlockFailed,

    #[error("decryption failed (wrong key or corrupted message)")]
    DecryptionFailed,

    #[error("key error: {0}")]
    Key(String),

    #[error("message error: {0}")]
    Message(String),
}
