//! Portable keypair generation and armored import/export.

use crate::error::{PortableError, PortableResult};
use pgp::composed::key::SecretKeyParamsBuilder;
use pgp::composed::{Deserializable, KeyType, SignedPublicKey, SignedSecretKey};
use pgp::crypto::hash::HashAlgorithm;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::types::{CompressionAlgorithm, SecretKeyTrait as _};
use smallvec::smallvec;
use tracing::debug;

/// How the generated private key is stored at rest.
///
/// `Unprotected` is a valid but explicit choice; there is no default.
#[derive(Clone, Debug)]
pub enum KeyProtection {
    /// Lock the private key with this passphrase.
    Passphrase(String),
    /// Store the private key unlocked.
    Unprotected,
}

/// A signed OpenPGP keypair.
pub struct PortableKeyPair {
    pub public: SignedPublicKey,
    pub secret: SignedSecretKey,
}

/// Generates an RSA OpenPGP keypair for `user_id`.
///
/// With [`KeyProtection::Passphrase`] the private key's secret material is
/// encrypted under the passphrase inside the key packet itself, so the
/// exported armored key is locked in a way third-party tools understand.
/// A blank passphrase is rejected with [`PortableError::MissingSecret`].
pub fn generate_keypair(
    user_id: &str,
    bits: u32,
    protection: &KeyProtection,
) -> PortableResult<PortableKeyPair> {
    let passphrase = match protection {
        KeyProtection::Passphrase(p) => {
            if p.trim().is_empty() {
                return Err(PortableError::MissingSecret);
            }
            Some(p.clone())
        }
        KeyProtection::Unprotected => None,
    };

    let mut builder = SecretKeyParamsBuilder::default();
    builder
        .key_type(KeyType::Rsa(bits))
        .can_create_certificates(false)
        .can_sign(true)
        .can_encrypt(true)
        .primary_user_id(user_id.into())
        .preferred_symmetric_algorithms(smallvec![SymmetricKeyAlgorithm::AES256])
        .preferred_hash_algorithms(smallvec![HashAlgorithm::SHA2_256])
        .preferred_compression_algorithms(smallvec![CompressionAlgorithm::ZLIB])
        .passphrase(passphrase.clone());

    let params = builder
        .build()
        .map_err(|e| PortableError::Key(format!("invalid key parameters: {e}")))?;
    let secret_key = params
        .generate()
        .map_err(|e| PortableError::Key(format!("key generation failed: {e}")))?;

    let key_pw = passphrase.unwrap_or_default();
    let signed_secret = secret_key
        .sign(|| key_pw.clone())
        .map_err(|e| PortableError::Key(format!("secret key signing failed: {e}")))?;
    let signed_public = signed_secret
        .public_key()
        .sign(&signed_secret, || key_pw.clone())
        .map_err(|e| PortableError::Key(format!("public key signing failed: {e}")))?;

    debug!("generated {bits}-bit portable keypair for {user_id}");
    Ok(PortableKeyPair {
        public: signed_public,
        secret: signed_secret,
    })
}

/// Whether the private key's secret material is passphrase-locked.
pub fn is_locked(key: &SignedSecretKey) -> bool {
    key.primary_key.secret_params().is_encrypted()
}

/// Exports a public key as ASCII armor.
pub fn export_public_key(key: &SignedPublicKey) -> PortableResult<String> {
    key.to_armored_string(None)
        .map_err(|e| PortableError::Key(format!("public key armor failed: {e}")))
}

/// Exports a secret key as ASCII armor.
///
/// For a locked key the armored output contains only the
/// passphrase-encrypted secret material. Exporting an unprotected key is
/// the caller's explicit choice, made at generation time.
pub fn export_secret_key(key: &SignedSecretKey) -> PortableResult<String> {
    key.to_armored_string(None)
        .map_err(|e| PortableError::Key(format!("secret key armor failed: {e}")))
}

/// Imports an armored public key.
pub fn import_public_key(armored: &str) -> PortableResult<SignedPublicKey> {
    SignedPublicKey::from_string(armored)
        .map(|(key, _headers)| key)
        .map_err(|e| PortableError::Key(format!("public key import failed: {e}")))
}

/// Imports an armored secret key. Lock state is preserved.
pub fn import_secret_key(armored: &str) -> PortableResult<SignedSecretKey> {
    SignedSecretKey::from_string(armored)
        .map(|(key, _headers)| key)
        .map_err(|e| PortableError::Key(format!("secret key import failed: {e}")))
}
