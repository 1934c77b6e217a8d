use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cifra_keyring::{
    decrypt, decrypt_with_key, encrypt, generate_keypair, import_public_key, lock_private_key,
    max_chunk_len, unlock_private_key, KeyringError, ProtectedPrivateKey, Session,
    CHUNK_DELIMITER,
};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::sync::OnceLock;

// 2048-bit keys keep generation fast; every size-dependent property is
// expressed relative to max_chunk_len, not absolute byte counts.
const TEST_BITS: usize = 2048;

fn test_keys() -> &'static (RsaPrivateKey, RsaPublicKey) {
    static KEYS: OnceLock<(RsaPrivateKey, RsaPublicKey)> = OnceLock::new();
    KEYS.get_or_init(|| cifra_keyring::generate(TEST_BITS).unwrap())
}

fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn round_trip_single_chunk() {
    let (private, public) = test_keys();
    let envelope = encrypt(b"short message", public).unwrap();
    assert_eq!(decrypt_with_key(&envelope, private).unwrap(), b"short message");
}

#[test]
fn round_trip_across_chunk_boundaries() {
    let (private, public) = test_keys();
    let ceiling = max_chunk_len(public);

    for len in [
        ceiling / 2,
        ceiling,
        (ceiling * 23) / 10,
        ceiling * 10,
    ] {
        let msg = patterned(len);
        let envelope = encrypt(&msg, public).unwrap();
        assert_eq!(decrypt_with_key(&envelope, private).unwrap(), msg, "len {len}");
    }
}

#[test]
fn chunk_count_matches_ceiling() {
    let (_, public) = test_keys();
    let ceiling = max_chunk_len(public);

    for len in [1, ceiling, ceiling + 1, ceiling * 4 + 7] {
        let envelope = encrypt(&patterned(len), public).unwrap();
        let chunks = envelope.split(CHUNK_DELIMITER).count();
        assert_eq!(chunks, len.div_ceil(ceiling), "len {len}");
    }
}

#[test]
fn chunk_i_decrypts_to_plaintext_slice_i() {
    let (private, public) = test_keys();
    let ceiling = max_chunk_len(public);
    let msg = patterned(ceiling * 3 + 11);

    let envelope = encrypt(&msg, public).unwrap();
    for (i, field) in envelope.split(CHUNK_DELIMITER).enumerate() {
        let ciphertext = BASE64.decode(field).unwrap();
        let chunk = private.decrypt(Oaep::new::<Sha256>(), &ciphertext).unwrap();
        let start = i * ceiling;
        let end = (start + ceiling).min(msg.len());
        assert_eq!(chunk, &msg[start..end], "chunk {i}");
    }
}

#[test]
fn chunk_order_is_significant() {
    let (private, public) = test_keys();
    let ceiling = max_chunk_len(public);
    let msg = patterned(ceiling * 2);

    let envelope = encrypt(&msg, public).unwrap();
    let mut fields: Vec<&str> = envelope.split(CHUNK_DELIMITER).collect();
    fields.swap(0, 1);
    let swapped = fields.join(&CHUNK_DELIMITER.to_string());

    let out = decrypt_with_key(&swapped, private).unwrap();
    assert_ne!(out, msg);
}

#[test]
fn same_payload_encrypts_differently() {
    let (_, public) = test_keys();
    // OAEP padding is randomized
    let env1 = encrypt(b"deterministic input", public).unwrap();
    let env2 = encrypt(b"deterministic input", public).unwrap();
    assert_ne!(env1, env2);
}

#[test]
fn empty_payload_rejected() {
    let (_, public) = test_keys();
    assert!(matches!(
        encrypt(b"", public),
        Err(KeyringError::InvalidInput)
    ));
}

#[test]
fn empty_envelope_rejected() {
    let (private, _) = test_keys();
    assert!(matches!(
        decrypt_with_key("", private),
        Err(KeyringError::MalformedEnvelope(_))
    ));
}

#[test]
fn envelope_with_garbage_chunk_rejected_before_cipher() {
    let (private, public) = test_keys();
    let envelope = encrypt(b"payload", public).unwrap();
    let tampered = format!("{envelope}:!!not-base64!!");
    assert!(matches!(
        decrypt_with_key(&tampered, private),
        Err(KeyringError::MalformedEnvelope(_))
    ));
}

#[test]
fn corrupted_chunk_fails_whole_operation() {
    let (private, public) = test_keys();
    let ceiling = max_chunk_len(public);
    let msg = patterned(ceiling * 2);

    let envelope = encrypt(&msg, public).unwrap();
    let mut fields: Vec<String> = envelope
        .split(CHUNK_DELIMITER)
        .map(str::to_string)
        .collect();
    let mut last = BASE64.decode(&fields[1]).unwrap();
    last[0] ^= 0xFF;
    fields[1] = BASE64.encode(last);
    let tampered = fields.join(&CHUNK_DELIMITER.to_string());

    assert!(matches!(
        decrypt_with_key(&tampered, private),
        Err(KeyringError::DecryptionFailed)
    ));
}

// ---------------------------------------------------------------------------
// Custody
// ---------------------------------------------------------------------------

#[test]
fn protected_key_round_trips() {
    let (private, _) = test_keys();
    let protected = lock_private_key(private, "custody secret").unwrap();
    let unlocked = unlock_private_key(&protected, "custody secret").unwrap();
    assert_eq!(&unlocked, private);
}

#[test]
fn protected_key_wire_format_round_trips() {
    let (private, _) = test_keys();
    let protected = lock_private_key(private, "custody secret").unwrap();

    let encoded = protected.encode();
    assert_eq!(encoded.matches(':').count(), 2);

    let parsed: ProtectedPrivateKey = encoded.parse().unwrap();
    let unlocked = unlock_private_key(&parsed, "custody secret").unwrap();
    assert_eq!(&unlocked, private);
}

#[test]
fn wrong_custody_secret_rejected() {
    let (private, _) = test_keys();
    let protected = lock_private_key(private, "right secret").unwrap();
    assert!(matches!(
        unlock_private_key(&protected, "wrong secret"),
        Err(KeyringError::WrongSecretOrCorruptKey)
    ));
}

#[test]
fn truncated_protected_key_fails_closed() {
    let (private, _) = test_keys();
    let protected = lock_private_key(private, "custody secret").unwrap();

    let encoded = protected.encode();
    let fields: Vec<&str> = encoded.split(':').collect();
    let mut ct = BASE64.decode(fields[2]).unwrap();
    ct.truncate(ct.len() / 2);
    let truncated = format!("{}:{}:{}", fields[0], fields[1], BASE64.encode(ct));

    let parsed: ProtectedPrivateKey = truncated.parse().unwrap();
    assert!(matches!(
        unlock_private_key(&parsed, "custody secret"),
        Err(KeyringError::WrongSecretOrCorruptKey)
    ));
}

#[test]
fn protected_key_field_count_enforced() {
    for bad in ["only-one-field", "a:b", "a:b:c:d"] {
        assert!(
            matches!(
                ProtectedPrivateKey::parse(bad),
                Err(KeyringError::MalformedEnvelope(_))
            ),
            "{bad}"
        );
    }
}

#[test]
fn protected_key_field_widths_enforced() {
    // 3 fields of valid base64, but salt/nonce widths are wrong
    let bad = format!(
        "{}:{}:{}",
        BASE64.encode([0u8; 8]),
        BASE64.encode([0u8; 12]),
        BASE64.encode([0u8; 64])
    );
    assert!(matches!(
        ProtectedPrivateKey::parse(&bad),
        Err(KeyringError::MalformedEnvelope(_))
    ));
}

#[test]
fn blank_custody_secret_rejected() {
    assert!(matches!(
        generate_keypair("   ", TEST_BITS),
        Err(KeyringError::MissingSecret)
    ));
}

#[test]
fn generate_keypair_produces_usable_pair() {
    let (public_pem, protected) = generate_keypair("custody secret", TEST_BITS).unwrap();
    let public = import_public_key(&public_pem).unwrap();

    let envelope = encrypt(b"end to end", &public).unwrap();
    let recovered = decrypt(&envelope, &protected, "custody secret").unwrap();
    assert_eq!(recovered, b"end to end");
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[test]
fn session_starts_locked() {
    let session = Session::generate("custody secret", TEST_BITS).unwrap();
    assert!(!session.is_unlocked());

    let envelope = session.encrypt(b"locked session can still encrypt").unwrap();
    assert!(matches!(
        session.decrypt(&envelope),
        Err(KeyringError::Locked)
    ));
}

#[test]
fn session_unlock_lock_cycle() {
    let mut session = Session::generate("custody secret", TEST_BITS).unwrap();
    let envelope = session.encrypt(b"session payload").unwrap();

    session.unlock("custody secret").unwrap();
    assert!(session.is_unlocked());
    assert_eq!(session.decrypt(&envelope).unwrap(), b"session payload");
    // Unlocked key is reusable until locked again
    assert_eq!(session.decrypt(&envelope).unwrap(), b"session payload");

    session.lock();
    assert!(!session.is_unlocked());
    assert!(matches!(
        session.decrypt(&envelope),
        Err(KeyringError::Locked)
    ));
}

#[test]
fn session_failed_unlock_stays_locked() {
    let mut session = Session::generate("custody secret", TEST_BITS).unwrap();
    assert!(matches!(
        session.unlock("wrong secret"),
        Err(KeyringError::WrongSecretOrCorruptKey)
    ));
    assert!(!session.is_unlocked());
}

#[test]
fn session_decrypt_once_leaves_state_alone() {
    let session = Session::generate("custody secret", TEST_BITS).unwrap();
    let envelope = session.encrypt(b"one shot").unwrap();

    let recovered = session.decrypt_once(&envelope, "custody secret").unwrap();
    assert_eq!(recovered, b"one shot");
    assert!(!session.is_unlocked());
}

#[test]
fn session_restores_from_exported_parts() {
    let session = Session::generate("custody secret", TEST_BITS).unwrap();
    let public_pem = session.export_public_key().unwrap();
    let protected = session.protected_private_key().clone();

    let mut restored = Session::from_parts(&public_pem, protected).unwrap();
    let envelope = restored.encrypt(b"restored session").unwrap();
    restored.unlock("custody secret").unwrap();
    assert_eq!(restored.decrypt(&envelope).unwrap(), b"restored session");
}
