//! Binary container format.
//!
//! A store file has this layout:
//!
//! ```text
//! [version: 1 byte][salt: 32 bytes][nonce: 24 bytes][ciphertext: to EOF]
//! ```
//!
//! - **Version**: format version (currently `1`).  Checked before any
//!   other byte is looked at; unknown versions are rejected outright.
//! - **Salt**: Argon2id input, stored in the clear.
//! - **Nonce**: XSalsa20-Poly1305 nonce for this exact ciphertext.
//! - **Ciphertext**: tag + encrypted payload.  No length prefix, it runs
//!   to end of file.
//!
//! This layer never interprets the ciphertext.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::crypto::{NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::errors::{LockboxError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Current (and only supported) binary format version.
pub const CURRENT_VERSION: u8 = 0x01;

/// Fixed-size header: 1 (version) + 32 (salt) + 24 (nonce).
pub const HEADER_LEN: usize = 1 + SALT_LEN + NONCE_LEN;

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// One decoded store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub version: u8,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

impl Container {
    /// Build a container for the current format version.
    pub fn new(salt: [u8; SALT_LEN], nonce: [u8; NONCE_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            version: CURRENT_VERSION,
            salt,
            nonce,
            ciphertext,
        }
    }

    /// Serialize to the on-disk byte layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.push(self.version); // 1 byte
        buf.extend_from_slice(&self.salt); // 32 bytes
        buf.extend_from_slice(&self.nonce); // 24 bytes
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Parse the on-disk byte layout.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let Some(&version) = data.first() else {
            return Err(LockboxError::BadFormat("file is empty".into()));
        };
        if version != CURRENT_VERSION {
            return Err(LockboxError::VersionMismatch {
                found: version,
                expected: CURRENT_VERSION,
            });
        }

        if data.len() < HEADER_LEN {
            return Err(LockboxError::BadFormat(format!(
                "file too small to hold a header ({} < {HEADER_LEN} bytes)",
                data.len()
            )));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&data[1..1 + SALT_LEN]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&data[1 + SALT_LEN..HEADER_LEN]);

        Ok(Self {
            version,
            salt,
            nonce,
            ciphertext: data[HEADER_LEN..].to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Read and decode a store file.
pub fn read_container(path: &Path) -> Result<Container> {
    let data = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LockboxError::NotFound(path.to_path_buf()),
        _ => LockboxError::Io(e),
    })?;
    Container::decode(&data)
}

/// Header facts that can be read without the passphrase.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ContainerInfo {
    pub version: u8,
    #[serde(serialize_with = "base64_encode")]
    pub salt: Vec<u8>,
    #[serde(serialize_with = "base64_encode")]
    pub nonce: Vec<u8>,
    pub ciphertext_len: usize,
    /// Plaintext size implied by the ciphertext length (tag stripped).
    pub payload_len: usize,
}

/// Parse a store's header without decrypting anything.
pub fn inspect(path: &Path) -> Result<ContainerInfo> {
    let container = read_container(path)?;
    Ok(ContainerInfo {
        version: container.version,
        salt: container.salt.to_vec(),
        nonce: container.nonce.to_vec(),
        ciphertext_len: container.ciphertext.len(),
        payload_len: container.ciphertext.len().saturating_sub(TAG_LEN),
    })
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded byte fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}
