//! `lockbox rekey`: change the store passphrase.
//!
//! Decrypts with the current passphrase, re-encrypts under a fresh salt
//! and nonce with the new one, and swaps the file in atomically.

use crate::cli::{load_settings, output, prompt_new_passphrase, prompt_passphrase, store_path};
use crate::cli::{Cli, NEW_PASSPHRASE_ENV};
use crate::errors::{LockboxError, Result};
use crate::vault::Store;

/// Execute the `rekey` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let path = store_path(cli, &settings)?;

    // 1. Open with the current passphrase before asking for a new one,
    //    so a typo does not cost the user a round of prompts.
    output::info("Enter your current store passphrase.");
    let old = prompt_passphrase("Current passphrase")?;
    let (mut store, payload) = Store::open(&path, old.as_bytes()).map_err(|e| match e {
        LockboxError::AuthenticationFailed => {
            LockboxError::CommandFailed("current passphrase is incorrect".into())
        }
        other => other,
    })?;

    // 2. Choose the new one.
    output::info("Choose your new store passphrase.");
    let new = prompt_new_passphrase(NEW_PASSPHRASE_ENV, &settings)?;

    // 3. Re-encrypt the payload we already hold and replace the file.
    store.change_passphrase(&payload, new.as_bytes())?;

    output::success(&format!("Passphrase changed for {}", path.display()));
    Ok(())
}
