//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - XSalsa20-Poly1305 authenticated encryption (`cipher`)

pub mod cipher;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use cipher::{generate_nonce, open, seal, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, generate_salt, DerivedKey, KdfParams, KEY_LEN, SALT_LEN};
