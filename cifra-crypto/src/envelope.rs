//! Password-based symmetric envelope codec.
//!
//! An envelope is `base64(salt ‖ iv ‖ ciphertext)` with fixed-width salt
//! (16 bytes) and IV (16 bytes) prefixes. The salt travels with the
//! ciphertext, so decryption re-derives the key from the embedded salt,
//! never from a caller-supplied one.

use crate::cipher::{cbc_decrypt, cbc_encrypt, random_iv, IV_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, KdfParams, Salt, SALT_SIZE};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Encrypts `plaintext` under a key derived from `secret`.
///
/// Generates a fresh salt and IV, derives an AES-256 key with
/// PBKDF2-HMAC-SHA-256 (100 000 iterations), and returns the text-safe
/// envelope. Empty payloads are rejected with [`CryptoError::InvalidInput`],
/// blank secrets with [`CryptoError::MissingSecret`].
pub fn encrypt(plaintext: &[u8], secret: &str) -> CryptoResult<String> {
    if plaintext.is_empty() {
        return Err(CryptoError::InvalidInput);
    }

    let salt = Salt::random();
    let iv = random_iv();
    let key = derive_key(secret, &salt, &KdfParams::default())?;

    let ciphertext = cbc_encrypt(&key, &iv, plaintext);

    let mut combined = Vec::with_capacity(SALT_SIZE + IV_SIZE + ciphertext.len());
    combined.extend_from_slice(salt.as_bytes());
    combined.extend_from_slice(&iv);
    combined.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(combined))
}

/// Decrypts an envelope produced by [`encrypt`].
///
/// Envelopes that fail base64 decoding or are shorter than the salt + IV
/// prefix are rejected with [`CryptoError::MalformedEnvelope`] before any
/// cipher call. All cipher-level failures collapse into
/// [`CryptoError::DecryptionFailed`].
pub fn decrypt(envelope: &str, secret: &str) -> CryptoResult<Vec<u8>> {
    if secret.trim().is_empty() {
        return Err(CryptoError::MissingSecret);
    }

    let combined = BASE64
        .decode(envelope.trim())
        .map_err(|e| CryptoError::MalformedEnvelope(format!("invalid base64: {e}")))?;

    if combined.len() < SALT_SIZE + IV_SIZE {
        return Err(CryptoError::MalformedEnvelope(format!(
            "envelope too short: {} bytes, need at least {}",
            combined.len(),
            SALT_SIZE + IV_SIZE
        )));
    }

    let salt = Salt::from_slice(&combined[..SALT_SIZE])?;
    let mut iv = [0u8; IV_SIZE];
    iv.copy_from_slice(&combined[SALT_SIZE..SALT_SIZE + IV_SIZE]);
    let ciphertext = &combined[SALT_SIZE + IV_SIZE..];

    let key = derive_key(secret, &salt, &KdfParams::default())?;
    cbc_decrypt(&key, &iv, ciphertext)
}

/// Encrypts a UTF-8 string.
pub fn encrypt_str(plaintext: &str, secret: &str) -> CryptoResult<String> {
    encrypt(plaintext.as_bytes(), secret)
}

/// Decrypts an envelope and interprets the payload as UTF-8.
pub fn decrypt_to_string(envelope: &str, secret: &str) -> CryptoResult<String> {
    let plaintext = decrypt(envelope, secret)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
}
