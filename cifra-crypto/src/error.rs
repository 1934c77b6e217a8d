//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in envelope encryption operations.
///
/// Wrong-secret and corrupted-ciphertext failures are deliberately merged
/// into [`CryptoError::DecryptionFailed`] so callers cannot build a padding
/// or verification oracle out of the error kind.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("no secret provided")]
    MissingSecret,

    #[error("no data to encrypt")]
    InvalidInput,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("decryption failed (wrong secret or corrupted data)")]
    DecryptionFailed,

    #[error("encryption error: {0}")]
    Encryption(String),
}
