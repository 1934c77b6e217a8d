//! Key derivation from user secrets.
//!
//! Secrets are low-entropy passwords or passphrases; they are stretched
//! into 256-bit keys with PBKDF2-HMAC-SHA-256 and a per-operation random
//! salt. The salt is public and stored alongside the ciphertext; the
//! derived key is held only in memory and zeroized on drop.

use crate::error::{CryptoError, CryptoResult};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a key-derivation salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Size of a derived symmetric key in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// PBKDF2 parameters. The hash is fixed at SHA-256.
#[derive(Clone, Debug)]
pub struct KdfParams {
    /// Iteration count for PBKDF2.
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: 100_000,
        }
    }
}

/// A 16-byte key-derivation salt.
///
/// Fresh per encryption operation; never reused across operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Generates a fresh random salt from the OS RNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a salt from a slice, rejecting wrong lengths.
    pub fn from_slice(slice: &[u8]) -> CryptoResult<Self> {
        if slice.len() != SALT_SIZE {
            return Err(CryptoError::MalformedEnvelope(format!(
                "salt must be {SALT_SIZE} bytes, got {}",
                slice.len()
            )));
        }
        let mut bytes = [0u8; SALT_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// A 256-bit symmetric key derived from a secret, zeroized on drop.
///
/// Owned exclusively by the codec call that created it; never logged
/// or serialized.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Derives a 256-bit key from `(secret, salt)` via PBKDF2-HMAC-SHA-256.
///
/// Secrets that are empty after trimming whitespace are rejected with
/// [`CryptoError::MissingSecret`].
pub fn derive_key(secret: &str, salt: &Salt, params: &KdfParams) -> CryptoResult<DerivedKey> {
    if secret.trim().is_empty() {
        return Err(CryptoError::MissingSecret);
    }

    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(
        secret.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        &mut key,
    );
    Ok(DerivedKey(key))
}
