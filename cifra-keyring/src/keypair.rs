//! RSA keypair generation, import/export, and chunk sizing.

use crate::error::{KeyringError, KeyringResult};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Default RSA modulus size in bits.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Generates a fresh RSA keypair.
pub fn generate(bits: usize) -> KeyringResult<(RsaPrivateKey, RsaPublicKey)> {
    let mut rng = rand::rngs::OsRng;
    let private = RsaPrivateKey::new(&mut rng, bits)
        .map_err(|e| KeyringError::Key(format!("key generation failed: {e}")))?;
    let public = RsaPublicKey::from(&private);
    Ok((private, public))
}

/// Exports a public key as SPKI PEM, a stable re-importable encoding.
pub fn export_public_key(public: &RsaPublicKey) -> KeyringResult<String> {
    public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyringError::Key(format!("public key export failed: {e}")))
}

/// Imports a public key from SPKI PEM.
pub fn import_public_key(pem: &str) -> KeyringResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|e| KeyringError::Key(format!("public key import failed: {e}")))
}

/// Exports the private key in its canonical PKCS#8 DER encoding.
///
/// The returned buffer is zeroized on drop; it only ever exists between
/// export and sealing.
pub(crate) fn export_private_der(private: &RsaPrivateKey) -> KeyringResult<Zeroizing<Vec<u8>>> {
    let doc = private
        .to_pkcs8_der()
        .map_err(|e| KeyringError::Key(format!("private key export failed: {e}")))?;
    Ok(Zeroizing::new(doc.as_bytes().to_vec()))
}

/// Imports a private key from PKCS#8 DER.
pub(crate) fn import_private_der(der: &[u8]) -> KeyringResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der)
        .map_err(|e| KeyringError::Key(format!("private key import failed: {e}")))
}

/// Maximum plaintext bytes a single RSA-OAEP-SHA-256 operation can carry
/// for this key.
///
/// Computed from the key's modulus size minus the OAEP overhead
/// (`2 * hash_len + 2`), never hard-coded: a 4096-bit modulus yields
/// 512 - 66 = 446 bytes. A mismatch between chunk size and key size would
/// corrupt payloads silently, so sizing always derives from the key itself.
pub fn max_chunk_len(public: &RsaPublicKey) -> usize {
    public.size() - 2 * Sha256::output_size() - 2
}
