//! Symmetric cipher primitives: AES-256-CBC and AES-256-GCM.
//!
//! CBC carries the password-encrypted payload envelopes; GCM seals
//! exported private keys, where authentication gates key recovery.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;

/// Size of the AES-CBC initialization vector in bytes.
pub const IV_SIZE: usize = 16;

/// Size of the AES-GCM nonce in bytes (96 bits).
pub const GCM_NONCE_SIZE: usize = 12;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Generates a fresh random CBC IV from the OS RNG.
pub(crate) fn random_iv() -> [u8; IV_SIZE] {
    let mut iv = [0u8; IV_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypts `plaintext` with AES-256-CBC and PKCS#7 padding.
pub fn cbc_encrypt(key: &DerivedKey, iv: &[u8; IV_SIZE], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypts an AES-256-CBC ciphertext.
///
/// Padding failures surface as [`CryptoError::DecryptionFailed`]; CBC has
/// no authentication tag, so a wrong key and corrupted data are
/// indistinguishable here.
pub fn cbc_decrypt(
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    Aes256CbcDec::new(key.as_bytes().into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

/// Seals `plaintext` with AES-256-GCM under a fresh random nonce.
///
/// Returns the nonce alongside the ciphertext (which includes the 16-byte
/// authentication tag).
pub fn gcm_seal(
    key: &DerivedKey,
    plaintext: &[u8],
) -> CryptoResult<([u8; GCM_NONCE_SIZE], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("failed to create cipher: {e}")))?;

    let mut nonce_bytes = [0u8; GCM_NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("seal failed: {e}")))?;

    Ok((nonce_bytes, ciphertext))
}

/// Opens an AES-256-GCM ciphertext, verifying its authentication tag.
pub fn gcm_open(
    key: &DerivedKey,
    nonce: &[u8; GCM_NONCE_SIZE],
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("failed to create cipher: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}
