//! Explicit session key state.
//!
//! A [`Session`] is a caller-owned value holding the public key, the
//! protected private key, and an optional unlocked private key. The
//! locked/unlocked transition is always explicit: `unlock` loads the key,
//! `lock` drops it. No key state lives outside the value.

use crate::custody::{unlock_private_key, ProtectedPrivateKey};
use crate::envelope;
use crate::error::{KeyringError, KeyringResult};
use crate::keypair;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

/// Session-scoped keypair with explicit lock state.
///
/// State machine: a freshly generated or imported session starts locked;
/// `unlock` moves it to unlocked, `lock` back. Dropping the session drops
/// any unlocked key material (`RsaPrivateKey` zeroizes on drop).
pub struct Session {
    public: RsaPublicKey,
    protected: ProtectedPrivateKey,
    unlocked: Option<RsaPrivateKey>,
}

impl Session {
    /// Generates a keypair and returns a locked session.
    pub fn generate(secret: &str, bits: usize) -> KeyringResult<Self> {
        let (public_pem, protected) = envelope::generate_keypair(secret, bits)?;
        let public = keypair::import_public_key(&public_pem)?;
        debug!("generated {bits}-bit session keypair");
        Ok(Self {
            public,
            protected,
            unlocked: None,
        })
    }

    /// Restores a locked session from an exported public key and a
    /// protected private key.
    pub fn from_parts(public_pem: &str, protected: ProtectedPrivateKey) -> KeyringResult<Self> {
        let public = keypair::import_public_key(public_pem)?;
        Ok(Self {
            public,
            protected,
            unlocked: None,
        })
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Exports the public key as SPKI PEM.
    pub fn export_public_key(&self) -> KeyringResult<String> {
        keypair::export_public_key(&self.public)
    }

    /// The protected private key, e.g. for persistence by the caller.
    pub fn protected_private_key(&self) -> &ProtectedPrivateKey {
        &self.protected
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.is_some()
    }

    /// Unlocks the private key for reuse across decrypt calls.
    ///
    /// On failure the session stays locked.
    pub fn unlock(&mut self, secret: &str) -> KeyringResult<()> {
        let private = unlock_private_key(&self.protected, secret)?;
        self.unlocked = Some(private);
        debug!("session unlocked");
        Ok(())
    }

    /// Locks the session, dropping the unlocked private key.
    pub fn lock(&mut self) {
        self.unlocked = None;
        debug!("session locked");
    }

    /// Encrypts `data` for this session's public key.
    pub fn encrypt(&self, data: &[u8]) -> KeyringResult<String> {
        envelope::encrypt(data, &self.public)
    }

    /// Decrypts an envelope with the unlocked private key.
    ///
    /// Fails with [`KeyringError::Locked`] if the session has not been
    /// explicitly unlocked.
    pub fn decrypt(&self, env: &str) -> KeyringResult<Vec<u8>> {
        let private = self.unlocked.as_ref().ok_or(KeyringError::Locked)?;
        envelope::decrypt_with_key(env, private)
    }

    /// One-shot decryption that does not change the session state: the
    /// private key is unlocked transiently and dropped before returning.
    pub fn decrypt_once(&self, env: &str, secret: &str) -> KeyringResult<Vec<u8>> {
        envelope::decrypt(env, &self.protected, secret)
    }
}
