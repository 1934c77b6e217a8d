//! OpenPGP-armored portable codec for Cifra.
//!
//! Keys and messages produced here are interoperable with third-party
//! OpenPGP tools: all framing (armor, packets, session keys) is delegated
//! to the `pgp` crate, and this crate only owns the key-lifecycle contract
//! shared with `cifra-keyring`:
//!
//! - key generation takes an explicit [`KeyProtection`] choice, so an
//!   unprotected-at-rest private key is a deliberate caller decision,
//!   never a silent default;
//! - decryption with a passphrase-locked key classifies failures as
//!   [`PortableError::MissingSecret`] (locked, no secret given) or
//!   [`PortableError::UnlockFailed`] (secret does not match) before any
//!   message-level work.

mod error;
mod keys;
mod message;

pub use error::{PortableError, PortableResult};
pub use keys::{
    export_public_key, export_secret_key, generate_keypair, import_public_key, import_secret_key,
    is_locked, KeyProtection, PortableKeyPair,
};
pub use message::{decrypt, encrypt};
