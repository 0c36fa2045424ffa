//! `lockbox init`: create a new store.

use zeroize::Zeroizing;

use crate::cli::{load_settings, output, prompt_new_passphrase, read_payload, store_path};
use crate::cli::{Cli, PASSPHRASE_ENV};
use crate::errors::{LockboxError, Result};
use crate::vault::Store;

/// Execute the `init` command.
pub fn execute(cli: &Cli, input: Option<&std::path::Path>) -> Result<()> {
    let settings = load_settings()?;
    let path = store_path(cli, &settings)?;

    // 1. Refuse before prompting if the store is already there.
    if path.exists() {
        output::tip("Use `lockbox write` to replace the payload of an existing store.");
        return Err(LockboxError::AlreadyExists(path));
    }

    // 2. Initial payload: the given file, or nothing.
    let payload = match input {
        Some(file) => read_payload(Some(file))?,
        None => Zeroizing::new(Vec::new()),
    };

    // 3. Choose a passphrase and write the store.
    let passphrase = prompt_new_passphrase(PASSPHRASE_ENV, &settings)?;
    Store::create(&path, passphrase.as_bytes(), &payload)?;

    output::success(&format!(
        "Store created at {} ({} bytes)",
        path.display(),
        payload.len()
    ));
    output::tip("Run `lockbox cat` to print the payload.");

    Ok(())
}
