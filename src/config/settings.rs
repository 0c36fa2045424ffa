use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};

/// Project-level configuration, loaded from `.lockbox.toml`.
///
/// Every field has a default so Lockbox works without any config file.
/// KDF costs are deliberately absent: they are part of the file format,
/// not a tuning knob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Store file used when `--file` is not given.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Minimum length the CLI demands for a new passphrase.
    #[serde(default = "default_min_passphrase_len")]
    pub min_passphrase_len: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_path() -> String {
    "lockbox.store".to_string()
}

fn default_min_passphrase_len() -> usize {
    8
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            min_passphrase_len: default_min_passphrase_len(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".lockbox.toml";

    /// Load settings from `<dir>/.lockbox.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.min_passphrase_len == 0 {
            return Err(LockboxError::Config(
                "min_passphrase_len must be at least 1".into(),
            ));
        }

        Ok(settings)
    }

    /// Resolve the store path: an explicit path wins, otherwise the
    /// configured one relative to `dir`.
    pub fn resolve_store_path(&self, dir: &Path, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(p) => dir.join(p),
            None => dir.join(&self.store_path),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
