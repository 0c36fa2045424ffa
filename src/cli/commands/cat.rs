//! `lockbox cat`: decrypt the store and print its payload.

use std::path::Path;

use crate::cli::{load_settings, prompt_passphrase, store_path, write_payload, Cli};
use crate::errors::Result;
use crate::vault::Store;

/// Execute the `cat` command.
pub fn execute(cli: &Cli, output: Option<&Path>) -> Result<()> {
    let settings = load_settings()?;
    let path = store_path(cli, &settings)?;

    let passphrase = prompt_passphrase("Enter store passphrase")?;
    let (_store, payload) = Store::open(&path, passphrase.as_bytes())?;

    write_payload(output, &payload)
}
