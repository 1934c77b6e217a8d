//! Protected private-key custody.
//!
//! The exported private key is sealed with AES-256-GCM under a key derived
//! from the user's custody secret. GCM is authenticated, so a wrong secret
//! or a corrupted blob fails closed with no partial key material released.
//!
//! Wire format: three base64 fields joined by `:`, exactly
//! `salt : nonce : ciphertext`. The delimiter does not occur in the base64
//! alphabet, so the split is unambiguous.

use crate::error::{KeyringError, KeyringResult};
use crate::keypair::{export_private_der, import_private_der};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cifra_crypto::{
    derive_key, gcm_open, gcm_seal, CryptoError, KdfParams, Salt, GCM_NONCE_SIZE, SALT_SIZE,
};
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// A private key encrypted under a custody secret.
///
/// Cannot be unlocked without the exact secret used to create it; the
/// GCM tag makes truncation or corruption an authentication failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtectedPrivateKey {
    salt: [u8; SALT_SIZE],
    nonce: [u8; GCM_NONCE_SIZE],
    ciphertext: Vec<u8>,
}

impl ProtectedPrivateKey {
    /// Encodes the triple as `base64(salt):base64(nonce):base64(ct)`.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}",
            BASE64.encode(self.salt),
            BASE64.encode(self.nonce),
            BASE64.encode(&self.ciphertext)
        )
    }

    /// Parses the wire format, checking field count and widths before any
    /// cipher call. Anything other than exactly three well-formed fields
    /// is [`KeyringError::MalformedEnvelope`].
    pub fn parse(s: &str) -> KeyringResult<Self> {
        let fields: Vec<&str> = s.trim().split(':').collect();
        if fields.len() != 3 {
            return Err(KeyringError::MalformedEnvelope(format!(
                "protected key must have 3 fields, got {}",
                fields.len()
            )));
        }

        let salt_bytes = BASE64
            .decode(fields[0])
            .map_err(|e| KeyringError::MalformedEnvelope(format!("invalid salt field: {e}")))?;
        let nonce_bytes = BASE64
            .decode(fields[1])
            .map_err(|e| KeyringError::MalformedEnvelope(format!("invalid nonce field: {e}")))?;
        let ciphertext = BASE64.decode(fields[2]).map_err(|e| {
            KeyringError::MalformedEnvelope(format!("invalid ciphertext field: {e}"))
        })?;

        if salt_bytes.len() != SALT_SIZE {
            return Err(KeyringError::MalformedEnvelope(format!(
                "salt must be {SALT_SIZE} bytes, got {}",
                salt_bytes.len()
            )));
        }
        if nonce_bytes.len() != GCM_NONCE_SIZE {
            return Err(KeyringError::MalformedEnvelope(format!(
                "nonce must be {GCM_NONCE_SIZE} bytes, got {}",
                nonce_bytes.len()
            )));
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&salt_bytes);
        let mut nonce = [0u8; GCM_NONCE_SIZE];
        nonce.copy_from_slice(&nonce_bytes);

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }
}

impl fmt::Display for ProtectedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for ProtectedPrivateKey {
    type Err = KeyringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Seals a private key under a custody secret.
///
/// Exports the key as PKCS#8 DER, derives a wrapping key from the secret
/// with a fresh salt, and seals the export with AES-256-GCM.
pub fn lock_private_key(
    private: &RsaPrivateKey,
    secret: &str,
) -> KeyringResult<ProtectedPrivateKey> {
    if secret.trim().is_empty() {
        return Err(KeyringError::MissingSecret);
    }

    let salt = Salt::random();
    let key = derive_key(secret, &salt, &KdfParams::default())?;
    let der = export_private_der(private)?;
    let (nonce, ciphertext) = gcm_seal(&key, &der)?;

    Ok(ProtectedPrivateKey {
        salt: *salt.as_bytes(),
        nonce,
        ciphertext,
    })
}

/// Unlocks a protected private key with the custody secret.
///
/// Authentication failure (wrong secret, truncated or corrupted blob)
/// yields [`KeyringError::WrongSecretOrCorruptKey`]; the two causes are
/// deliberately not distinguished.
pub fn unlock_private_key(
    protected: &ProtectedPrivateKey,
    secret: &str,
) -> KeyringResult<RsaPrivateKey> {
    if secret.trim().is_empty() {
        return Err(KeyringError::MissingSecret);
    }

    let salt = Salt::from_bytes(protected.salt);
    let key = derive_key(secret, &salt, &KdfParams::default())?;

    let der = Zeroizing::new(match gcm_open(&key, &protected.nonce, &protected.ciphertext) {
        Ok(plaintext) => plaintext,
        Err(CryptoError::DecryptionFailed) => return Err(KeyringError::WrongSecretOrCorruptKey),
        Err(other) => return Err(other.into()),
    });

    // The tag verified, so a parse failure here means the sealed blob was
    // not a private key export at all
    import_private_der(&der).map_err(|_| KeyringError::WrongSecretOrCorruptKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProtectedPrivateKey {
        ProtectedPrivateKey {
            salt: [1u8; SALT_SIZE],
            nonce: [2u8; GCM_NONCE_SIZE],
            ciphertext: vec![3u8; 48],
        }
    }

    #[test]
    fn wire_format_has_three_base64_fields() {
        let encoded = sample().encode();
        let fields: Vec<&str> = encoded.split(':').collect();
        assert_eq!(fields.len(), 3);
        for field in fields {
            assert!(BASE64.decode(field).is_ok());
        }
    }

    #[test]
    fn encode_parse_round_trips() {
        let original = sample();
        let parsed = ProtectedPrivateKey::parse(&original.encode()).unwrap();
        assert_eq!(parsed.salt, original.salt);
        assert_eq!(parsed.nonce, original.nonce);
        assert_eq!(parsed.ciphertext, original.ciphertext);
    }

    #[test]
    fn serde_round_trips() {
        let original = sample();
        let json = serde_json::to_string(&original).unwrap();
        let back: ProtectedPrivateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back.salt, original.salt);
        assert_eq!(back.ciphertext, original.ciphertext);
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert!(matches!(
            ProtectedPrivateKey::parse("a:b"),
            Err(KeyringError::MalformedEnvelope(_))
        ));
    }
}
