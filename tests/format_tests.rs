//! Integration tests for the on-disk container layout.

use std::fs;

use lockbox::vault::{inspect, Container, Store, CURRENT_VERSION, HEADER_LEN};
use lockbox::LockboxError;
use tempfile::TempDir;

#[test]
fn created_file_matches_documented_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.store");
    let store = Store::create(&path, b"pass", b"cleartext").unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes[0], CURRENT_VERSION);
    assert_eq!(&bytes[1..33], store.salt());
    assert_eq!(&bytes[33..57], store.nonce());
    // 16-byte tag + 9 bytes of payload.
    assert_eq!(bytes.len(), HEADER_LEN + 16 + 9);
}

#[test]
fn inspect_reads_header_without_passphrase() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("info.store");
    let store = Store::create(&path, b"pass", b"0123456789").unwrap();

    let info = inspect(&path).unwrap();
    assert_eq!(info.version, CURRENT_VERSION);
    assert_eq!(info.salt, store.salt().to_vec());
    assert_eq!(info.nonce, store.nonce().to_vec());
    assert_eq!(info.ciphertext_len, 26);
    assert_eq!(info.payload_len, 10);
}

#[test]
fn inspect_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = inspect(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, LockboxError::NotFound(_)));
}

#[test]
fn encode_decode_preserves_fields() {
    let c = Container::new([9u8; 32], [8u8; 24], b"opaque".to_vec());
    let decoded = Container::decode(&c.encode()).unwrap();
    assert_eq!(decoded, c);
}

#[test]
fn every_foreign_version_byte_is_rejected() {
    let rest = [0u8; 80];
    for version in (0u8..=255).filter(|&v| v != CURRENT_VERSION) {
        let mut bytes = vec![version];
        bytes.extend_from_slice(&rest);
        assert!(
            matches!(
                Container::decode(&bytes),
                Err(LockboxError::VersionMismatch { found, .. }) if found == version
            ),
            "version {version} should be rejected"
        );
    }
}

#[test]
fn opens_reference_version_1_file() {
    // version | salt 0x00..0x1f | nonce 0x64..0x7b | tag + "cleartext"
    let bytes = hex::decode(concat!(
        "01",
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "6465666768696a6b6c6d6e6f707172737475767778797a7b",
        "85e0c6b614ad61f6411bda7e584bc062d2fd7ccb5a87d0f2d5",
    ))
    .unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reference.store");
    fs::write(&path, &bytes).unwrap();

    let (store, payload) = Store::open(&path, b"Staatsgeheimnis").unwrap();

    assert_eq!(payload.as_slice(), b"cleartext");
    assert_eq!(store.salt()[31], 0x1f);
    assert_eq!(store.nonce()[0], 0x64);
}
