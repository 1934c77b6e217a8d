//! Armored message encryption and decryption.

use crate::error::{PortableError, PortableResult};
use crate::keys::is_locked;
use pgp::composed::{Deserializable, Message, SignedPublicKey, SignedSecretKey};
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::types::SecretKeyTrait;

/// Encrypts `data` to a recipient's public key as an armored message.
///
/// The OpenPGP layer handles arbitrary payload lengths internally (session
/// key plus symmetric cipher), so there is no chunking here.
pub fn encrypt(data: &[u8], public: &SignedPublicKey) -> PortableResult<String> {
    if data.is_empty() {
        return Err(PortableError::InvalidInput);
    }

    let message = Message::new_literal_bytes("", data);
    let mut rng = rand::rngs::OsRng;
    let encrypted = message
        .encrypt_to_keys(&mut rng, SymmetricKeyAlgorithm::AES256, &[public])
        .map_err(|e| PortableError::Message(format!("encryption failed: {e}")))?;

    encrypted
        .to_armored_string(None)
        .map_err(|e| PortableError::Message(format!("armoring failed: {e}")))
}

/// Decrypts an armored message with the matching secret key.
///
/// If the key is locked, `secret` is required (`MissingSecret` otherwise)
/// and is verified first: a non-matching secret fails with `UnlockFailed`
/// before any message decryption is attempted. Failures past the unlock
/// stage collapse into `DecryptionFailed`.
pub fn decrypt(
    armored: &str,
    secret_key: &SignedSecretKey,
    secret: Option<&str>,
) -> PortableResult<Vec<u8>> {
    let key_pw = if is_locked(secret_key) {
        let secret = match secret {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err(PortableError::MissingSecret),
        };
        // Probe the unlock before touching the message so a wrong secret
        // is classified as UnlockFailed, not a generic decryption error
        secret_key
            .unlock(|| secret.to_string(), |_| Ok(()))
            .map_err(|_| PortableError::UnlockFailed)?;
        secret.to_string()
    } else {
        String::new()
    };

    let (message, _headers) = Message::from_string(armored)
        .map_err(|e| PortableError::Message(format!("invalid armored message: {e}")))?;

    let (mut decrypter, _key_ids) = message
        .decrypt(|| key_pw.clone(), &[secret_key])
        .map_err(|_| PortableError::DecryptionFailed)?;

    let decrypted = decrypter
        .next()
        .ok_or(PortableError::DecryptionFailed)?
        .map_err(|_| PortableError::DecryptionFailed)?;

    decrypted
        .get_content()
        .map_err(|_| PortableError::DecryptionFailed)?
        .ok_or(PortableError::DecryptionFailed)
}
