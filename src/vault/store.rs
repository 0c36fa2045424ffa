//! High-level store operations.
//!
//! `Store` binds one container file to the key material derived from its
//! passphrase, so callers can work with plain `create` / `open` / `save`
//! / `rekey` calls and never touch salts, nonces or keys themselves.
//!
//! The payload is opaque bytes; this layer never parses it.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::{self, DerivedKey, NONCE_LEN, SALT_LEN};
use crate::errors::{LockboxError, Result};

use super::atomic;
use super::format::{self, Container};

/// Handle to one open store file.  Create one with `Store::create` or
/// `Store::open`, then call `save` to replace the payload.
#[derive(Debug)]
pub struct Store {
    /// Path to the container file on disk.
    path: PathBuf,

    /// Argon2id salt, fixed for the life of the file.
    salt: [u8; SALT_LEN],

    /// Nonce of the ciphertext currently on disk.
    nonce: [u8; NONCE_LEN],

    /// Key derived from passphrase + salt (zeroized on drop).
    key: DerivedKey,
}

impl Store {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a brand-new store file at `path` holding `payload`.
    ///
    /// Generates a random salt and nonce, derives the key from the
    /// passphrase and writes the container in one pass.  Refuses to
    /// touch an existing file; a partially written file is removed.
    pub fn create(path: &Path, passphrase: &[u8], payload: &[u8]) -> Result<Self> {
        // Cheap early exit before paying for Argon2id; `write_new`
        // still enforces this race-free.
        if path.exists() {
            return Err(LockboxError::AlreadyExists(path.to_path_buf()));
        }

        let (store, container) = Self::seal_fresh(path, passphrase, payload)?;
        atomic::write_new(path, &container.encode())?;

        tracing::info!(path = %path.display(), bytes = payload.len(), "created store");
        Ok(store)
    }

    /// Open an existing store and return it with the decrypted payload.
    ///
    /// A wrong passphrase and a corrupted or tampered ciphertext are
    /// indistinguishable: both are `AuthenticationFailed`.
    pub fn open(path: &Path, passphrase: &[u8]) -> Result<(Self, Zeroizing<Vec<u8>>)> {
        // 1. Read and parse; the version byte is checked first.
        let container = format::read_container(path)?;

        // 2. Re-derive the key from the stored salt.
        let key = crypto::derive_key(passphrase, &container.salt)?;

        // 3. Verify and decrypt.
        let payload = Zeroizing::new(crypto::open(
            &key,
            &container.nonce,
            &container.ciphertext,
        )?);

        tracing::debug!(path = %path.display(), bytes = payload.len(), "opened store");

        let store = Self {
            path: path.to_path_buf(),
            salt: container.salt,
            nonce: container.nonce,
            key,
        };
        Ok((store, payload))
    }

    /// Check that `passphrase` opens the store at `path`.
    pub fn verify_passphrase(path: &Path, passphrase: &[u8]) -> Result<()> {
        Self::open(path, passphrase).map(|_| ())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replace the stored payload, writing the file atomically.
    ///
    /// Every save seals under a fresh random nonce, which is persisted
    /// with the new ciphertext.  Salt and key stay the same, so the same
    /// passphrase keeps working.  On error the file on disk and this
    /// handle are both unchanged.
    pub fn save(&mut self, payload: &[u8]) -> Result<()> {
        let nonce = self.next_nonce()?;
        let ciphertext = crypto::seal(&self.key, &nonce, payload)?;
        let container = Container::new(self.salt, nonce, ciphertext);

        atomic::write_atomic(&self.path, &container.encode())?;
        self.nonce = nonce;

        tracing::debug!(path = %self.path.display(), bytes = payload.len(), "saved store");
        Ok(())
    }

    /// Change the passphrase of the store at `path`.
    ///
    /// Opens with `old_passphrase` (an `AuthenticationFailed` here means
    /// the old passphrase is wrong), then hands over to
    /// `change_passphrase`.  The original file is untouched on any
    /// failure.
    pub fn rekey(path: &Path, old_passphrase: &[u8], new_passphrase: &[u8]) -> Result<()> {
        let (mut store, payload) = Self::open(path, old_passphrase)?;
        store.change_passphrase(&payload, new_passphrase)
    }

    /// Re-encrypt `payload` under `new_passphrase` and swap the file in
    /// atomically.
    ///
    /// Salt, nonce and key are all regenerated.  `payload` must be the
    /// store's current contents (as returned by `open`), since the
    /// handle does not keep plaintext.  On error the file on disk and
    /// this handle are both unchanged.
    pub fn change_passphrase(&mut self, payload: &[u8], new_passphrase: &[u8]) -> Result<()> {
        let (fresh, container) = Self::seal_fresh(&self.path, new_passphrase, payload)?;

        atomic::write_atomic(&self.path, &container.encode())?;
        *self = fresh;

        tracing::info!(path = %self.path.display(), "rekeyed store");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the Argon2id salt of this store.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Returns the nonce of the ciphertext currently on disk.
    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Derive fresh key material and seal `payload` into a new container.
    fn seal_fresh(path: &Path, passphrase: &[u8], payload: &[u8]) -> Result<(Self, Container)> {
        if passphrase.is_empty() {
            return Err(LockboxError::EmptyPassphrase);
        }

        let salt = crypto::generate_salt()?;
        let key = crypto::derive_key(passphrase, &salt)?;
        let nonce = crypto::generate_nonce()?;
        let ciphertext = crypto::seal(&key, &nonce, payload)?;

        let store = Self {
            path: path.to_path_buf(),
            salt,
            nonce,
            key,
        };
        Ok((store, Container::new(salt, nonce, ciphertext)))
    }

    /// A random nonce guaranteed to differ from the one on disk.
    fn next_nonce(&self) -> Result<[u8; NONCE_LEN]> {
        loop {
            let nonce = crypto::generate_nonce()?;
            if nonce != self.nonce {
                return Ok(nonce);
            }
        }
    }
}
