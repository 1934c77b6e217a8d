//! Chunked RSA-OAEP envelope codec.
//!
//! RSA-OAEP encrypts at most `max_chunk_len` bytes per operation, so a
//! payload becomes an ordered sequence of independently encrypted chunks.
//! The envelope is the base64 chunk ciphertexts joined with `:`; order is
//! significant and preserved end to end.

use crate::custody::{lock_private_key, unlock_private_key, ProtectedPrivateKey};
use crate::error::{KeyringError, KeyringResult};
use crate::keypair::{self, max_chunk_len};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// Separator between chunk ciphertexts; not part of the base64 alphabet.
pub const CHUNK_DELIMITER: char = ':';

/// Generates a keypair and seals its private half under `secret`.
///
/// Returns the public key as SPKI PEM and the protected private key. The
/// secret is used only for key custody, never for message encryption.
pub fn generate_keypair(
    secret: &str,
    bits: usize,
) -> KeyringResult<(String, ProtectedPrivateKey)> {
    if secret.trim().is_empty() {
        return Err(KeyringError::MissingSecret);
    }

    let (private, public) = keypair::generate(bits)?;
    let public_pem = keypair::export_public_key(&public)?;
    let protected = lock_private_key(&private, secret)?;
    Ok((public_pem, protected))
}

/// Encrypts `data` for `public`, splitting into OAEP-sized chunks.
///
/// The per-chunk ceiling is computed from the key's modulus size. Chunks
/// are encrypted in input order and the output preserves that order.
pub fn encrypt(data: &[u8], public: &RsaPublicKey) -> KeyringResult<String> {
    if data.is_empty() {
        return Err(KeyringError::InvalidInput);
    }

    let ceiling = max_chunk_len(public);
    let mut rng = rand::rngs::OsRng;
    let mut chunks = Vec::with_capacity(data.len().div_ceil(ceiling));

    for chunk in data.chunks(ceiling) {
        let ciphertext = public
            .encrypt(&mut rng, Oaep::new::<Sha256>(), chunk)
            .map_err(|e| KeyringError::Encryption(format!("chunk encryption failed: {e}")))?;
        chunks.push(BASE64.encode(ciphertext));
    }

    Ok(chunks.join(&CHUNK_DELIMITER.to_string()))
}

/// Decrypts an envelope with an unlocked private key.
///
/// The frame is validated in full (non-empty fields, valid base64) before
/// any cipher call; a failure in any chunk aborts the whole operation with
/// no partial output.
pub fn decrypt_with_key(envelope: &str, private: &RsaPrivateKey) -> KeyringResult<Vec<u8>> {
    let envelope = envelope.trim();
    if envelope.is_empty() {
        return Err(KeyringError::MalformedEnvelope("empty envelope".into()));
    }

    let mut chunks = Vec::new();
    for (i, field) in envelope.split(CHUNK_DELIMITER).enumerate() {
        if field.is_empty() {
            return Err(KeyringError::MalformedEnvelope(format!(
                "empty chunk at index {i}"
            )));
        }
        let ciphertext = BASE64.decode(field).map_err(|e| {
            KeyringError::MalformedEnvelope(format!("invalid base64 in chunk {i}: {e}"))
        })?;
        chunks.push(ciphertext);
    }

    let mut plaintext = Vec::new();
    for ciphertext in &chunks {
        let chunk = private
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|_| KeyringError::DecryptionFailed)?;
        plaintext.extend_from_slice(&chunk);
    }

    Ok(plaintext)
}

/// One-shot decryption: unlocks the protected key, decrypts, and drops
/// the unlocked key when the call returns.
pub fn decrypt(
    envelope: &str,
    protected: &ProtectedPrivateKey,
    secret: &str,
) -> KeyringResult<Vec<u8>> {
    let private = unlock_private_key(protected, secret)?;
    decrypt_with_key(envelope, &private)
}
