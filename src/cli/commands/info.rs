//! `lockbox info`: show the store header without decrypting.

use crate::cli::{load_settings, output, store_path, Cli};
use crate::errors::{LockboxError, Result};
use crate::vault;

/// Execute the `info` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let settings = load_settings()?;
    let path = store_path(cli, &settings)?;

    let info = vault::inspect(&path)?;

    if json {
        let text = serde_json::to_string_pretty(&info)
            .map_err(|e| LockboxError::CommandFailed(format!("JSON output: {e}")))?;
        println!("{text}");
    } else {
        output::print_info_table(&info);
    }
    Ok(())
}
