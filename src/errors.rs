use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Existence errors ---
    #[error("Store already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Store not found at {0}")]
    NotFound(PathBuf),

    // --- Format errors ---
    #[error("Invalid store format: {0}")]
    BadFormat(String),

    #[error("Unsupported store version {found}, expected {expected}")]
    VersionMismatch { found: u8, expected: u8 },

    // --- Crypto errors ---
    #[error("Authentication failed — wrong passphrase or corrupted store")]
    AuthenticationFailed,

    #[error("Crypto failure: {0}")]
    Crypto(String),

    #[error("Passphrase must not be empty")]
    EmptyPassphrase,

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to move {from} over {to}: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Passphrase mismatch — passphrases do not match")]
    PasswordMismatch,
}

impl LockboxError {
    /// Returns `true` for the wrong-passphrase / tampered-ciphertext case.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
