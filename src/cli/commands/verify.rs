//! `lockbox verify`: check that a passphrase opens the store.

use crate::cli::{load_settings, output, prompt_passphrase, store_path, Cli};
use crate::errors::Result;
use crate::vault::Store;

/// Execute the `verify` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let path = store_path(cli, &settings)?;

    let passphrase = prompt_passphrase("Enter store passphrase")?;
    let (_store, payload) = Store::open(&path, passphrase.as_bytes())?;

    output::success(&format!(
        "Passphrase OK — {} holds {} bytes",
        path.display(),
        payload.len()
    ));
    Ok(())
}
