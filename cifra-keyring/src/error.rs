//! Keyring error types.

use cifra_crypto::CryptoError;
use thiserror::Error;

/// Result type for keyring operations.
pub type KeyringResult<T> = Result<T, KeyringError>;

/// Errors that can occur in keypair custody and envelope operations.
#[derive(Debug, Error)]
pub enum KeyringError {
    #[error("no secret provided")]
    MissingSecret,

    #[error("no data to encrypt")]
    InvalidInput,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Unlocking a protected private key failed. Authentication failure
    /// does not reveal whether the secret was wrong or the stored key
    /// material was corrupted.
    #[error("wrong secret or corrupted key material")]
    WrongSecretOrCorruptKey,

    #[error("decryption failed (wrong key or corrupted data)")]
    DecryptionFailed,

    #[error("session is locked")]
    Locked,

    #[error("key error: {0}")]
    Key(String),

    #[error("encryption error: {0}")]
    Encryption(String),
}

impl From<CryptoError> for KeyringError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::MissingSecret => KeyringError::MissingSecret,
            CryptoError::InvalidInput => KeyringError::InvalidInput,
            CryptoError::MalformedEnvelope(msg) => KeyringError::MalformedEnvelope(msg),
            CryptoError::DecryptionFailed => KeyringError::DecryptionFailed,
            CryptoError::Encryption(msg) => KeyringError::Encryption(msg),
        }
    }
}
