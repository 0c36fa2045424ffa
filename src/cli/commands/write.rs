//! `lockbox write`: replace the stored payload.
//!
//! The new payload is read before the store is opened, so a failed read
//! never leaves a half-finished command behind.

use std::path::Path;

use crate::cli::{load_settings, output, prompt_passphrase, read_payload, store_path, Cli};
use crate::errors::Result;
use crate::vault::Store;

/// Execute the `write` command.
pub fn execute(cli: &Cli, input: Option<&Path>) -> Result<()> {
    let settings = load_settings()?;
    let path = store_path(cli, &settings)?;

    let payload = read_payload(input)?;

    let passphrase = prompt_passphrase("Enter store passphrase")?;
    let (mut store, _old) = Store::open(&path, passphrase.as_bytes())?;
    store.save(&payload)?;

    output::success(&format!(
        "Saved {} bytes to {}",
        payload.len(),
        path.display()
    ));
    Ok(())
}
