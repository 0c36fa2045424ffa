//! XSalsa20-Poly1305 authenticated encryption (the NaCl secretbox
//! construction).
//!
//! The nonce is supplied by the caller rather than generated here,
//! because the container persists it in a fixed header slot.  Callers
//! must never reuse a nonce under the same key; `generate_nonce` gives a
//! fresh random one for every seal.
//!
//! Output layout of `seal`:
//!   [ 16-byte Poly1305 tag | encrypted plaintext ]

use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::{Key, Nonce, XSalsa20Poly1305};
use rand::rngs::OsRng;
use rand::TryRngCore;

use super::kdf::DerivedKey;
use crate::errors::{LockboxError, Result};

/// Size of the XSalsa20 nonce in bytes.
pub const NONCE_LEN: usize = 24;

/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt and authenticate `plaintext`.
///
/// The result is exactly `plaintext.len() + TAG_LEN` bytes.  An empty
/// plaintext is valid and produces a bare tag.
pub fn seal(key: &DerivedKey, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = XSalsa20Poly1305::new(Key::from_slice(key.as_bytes()));

    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| LockboxError::Crypto(format!("encryption error: {e}")))
}

/// Verify and decrypt `ciphertext`.
///
/// The tag is checked before any plaintext is produced.  Wrong key,
/// wrong nonce, truncation and tampering all collapse into the same
/// `AuthenticationFailed` error.
pub fn open(key: &DerivedKey, nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = XSalsa20Poly1305::new(Key::from_slice(key.as_bytes()));

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| LockboxError::AuthenticationFailed)
}

/// Generate a cryptographically random 24-byte nonce.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| LockboxError::Crypto(format!("OS random source failed: {e}")))?;
    Ok(nonce)
}
