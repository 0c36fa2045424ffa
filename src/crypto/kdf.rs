//! Passphrase-based key derivation using Argon2id.
//!
//! The cost parameters are fixed: every store written by any build must
//! be openable by every other build, and the brute-force cost of a
//! stolen file has to be a known quantity.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{LockboxError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Parallelism lanes.
    pub parallelism: u32,
}

impl KdfParams {
    /// The only parameter set used for version-1 stores (64 MiB, 1 pass, 4 lanes).
    pub const FIXED: Self = Self {
        memory_kib: 64 * 1024,
        iterations: 1,
        parallelism: 4,
    };
}

/// A 32-byte symmetric key derived from a passphrase.
///
/// Never persisted; zeroed when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derive a 32-byte key from a passphrase and salt using Argon2id.
///
/// Deterministic: the same passphrase + salt always yields the same key,
/// which is what lets a store be reopened without ever writing the key
/// down. The only failure is the primitive itself refusing to run
/// (e.g. allocation failure), reported as `LockboxError::Crypto`.
pub fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    let p = KdfParams::FIXED;
    let params = Params::new(p.memory_kib, p.iterations, p.parallelism, Some(KEY_LEN))
        .map_err(|e| LockboxError::Crypto(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| LockboxError::Crypto(format!("Argon2id hashing failed: {e}")))?;

    let derived = DerivedKey::new(key);
    key.zeroize();
    Ok(derived)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| LockboxError::Crypto(format!("OS random source failed: {e}")))?;
    Ok(salt)
}
