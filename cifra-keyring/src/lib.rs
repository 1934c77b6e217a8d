//! Asymmetric envelope encryption and key custody for Cifra.
//!
//! Builds the keypair half of the Cifra protocol on RSA-OAEP:
//!
//! 1. **Keypair generation**: an RSA keypair whose private half is never
//!    stored in the clear. It is exported as PKCS#8 DER and sealed with
//!    AES-256-GCM under a key derived from a custody secret
//!    (see [`ProtectedPrivateKey`]).
//!
//! 2. **Chunked envelopes**: RSA-OAEP can only encrypt a bounded number of
//!    bytes per operation, so payloads are split into sequential chunks at
//!    a ceiling computed from the key's modulus size, encrypted
//!    independently, and joined with `:` into a single text envelope.
//!
//! 3. **Sessions**: an explicit, caller-owned [`Session`] value carries the
//!    locked/unlocked state of the private key. There is no global key
//!    state; unlocking is a visible transition and locking drops the key.

mod custody;
mod envelope;
mod error;
mod keypair;
mod session;

pub use custody::{lock_private_key, unlock_private_key, ProtectedPrivateKey};
pub use envelope::{decrypt, decrypt_with_key, encrypt, generate_keypair, CHUNK_DELIMITER};
pub use error::{KeyringError, KeyringResult};
pub use keypair::{
    export_public_key, generate, import_public_key, max_chunk_len, DEFAULT_KEY_BITS,
};
pub use session::Session;
