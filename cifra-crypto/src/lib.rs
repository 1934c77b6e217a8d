//! Password-based envelope encryption for Cifra.
//!
//! Provides the symmetric half of the Cifra protocol:
//! - PBKDF2-HMAC-SHA-256 key derivation from user secrets
//! - AES-256-CBC envelopes for password-encrypted payloads
//! - AES-256-GCM sealing for key custody (used by `cifra-keyring`)
//!
//! # Envelope layout
//!
//! A symmetric envelope is `base64(salt ‖ iv ‖ ciphertext)`. The salt and
//! IV are fixed-width and travel with the ciphertext, so the secret is the
//! only input needed for decryption. Salt and IV are freshly random per
//! encryption and never reused.
//!
//! Key material derived from a secret exists only for the duration of the
//! call that uses it and is zeroized on drop.

mod cipher;
mod envelope;
mod error;
mod key;

pub use cipher::{cbc_decrypt, cbc_encrypt, gcm_open, gcm_seal, GCM_NONCE_SIZE, IV_SIZE};
pub use envelope::{decrypt, decrypt_to_string, encrypt, encrypt_str};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, KdfParams, Salt, KEY_SIZE, SALT_SIZE};
