//! Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{LockboxError, Result};

/// Environment variable holding the store passphrase (scripts/CI).
pub const PASSPHRASE_ENV: &str = "LOCKBOX_PASSPHRASE";

/// Environment variable holding the replacement passphrase for `rekey`.
pub const NEW_PASSPHRASE_ENV: &str = "LOCKBOX_NEW_PASSPHRASE";

/// Lockbox CLI: passphrase-protected encrypted blob store.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Passphrase-protected encrypted blob store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store file (default: `store_path` from .lockbox.toml, else lockbox.store)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Log store operations to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new store (empty, or holding the contents of --input)
    Init {
        /// File whose contents become the initial payload
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Decrypt the store and print its payload
    Cat {
        /// Write the payload to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the stored payload (from --input, or stdin)
    Write {
        /// File whose contents become the new payload
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Change the store's passphrase
    Rekey,

    /// Check that a passphrase opens the store
    Verify,

    /// Show the store header without decrypting
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the passphrase of an existing store, trying in order:
/// 1. `LOCKBOX_PASSPHRASE` env var
/// 2. Interactive prompt
pub fn prompt_passphrase(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env(PASSPHRASE_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation.
///
/// `env_var` short-circuits the prompt for scripted use.  Enforces the
/// configured minimum length either way.
pub fn prompt_new_passphrase(env_var: &str, settings: &Settings) -> Result<Zeroizing<String>> {
    let min = settings.min_passphrase_len;

    if let Some(pw) = passphrase_from_env(env_var) {
        check_passphrase_len(&pw, min)?;
        return Ok(pw);
    }

    loop {
        let passphrase = dialoguer::Password::new()
            .with_prompt("Choose store passphrase")
            .with_confirmation(
                "Confirm store passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if check_passphrase_len(&passphrase, min).is_err() {
            output::warning(&format!(
                "Passphrase must be at least {min} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

fn passphrase_from_env(var: &str) -> Option<Zeroizing<String>> {
    match std::env::var(var) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Reject passphrases shorter than `min` characters.
pub fn check_passphrase_len(passphrase: &str, min: usize) -> Result<()> {
    if passphrase.chars().count() < min {
        return Err(LockboxError::CommandFailed(format!(
            "passphrase must be at least {min} characters"
        )));
    }
    Ok(())
}

/// Load settings from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Build the full path to the store file from CLI args and settings.
pub fn store_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(settings.resolve_store_path(&cwd, cli.file.as_deref()))
}

/// Read a payload from `input`, or from stdin when it is `None`.
pub fn read_payload(input: Option<&Path>) -> Result<Zeroizing<Vec<u8>>> {
    match input {
        Some(path) => Ok(Zeroizing::new(fs::read(path)?)),
        None => {
            let mut buf = Zeroizing::new(Vec::new());
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write a payload to `output`, or to stdout when it is `None`.
///
/// A new output file is created owner-only on Unix.
pub fn write_payload(output: Option<&Path>, payload: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            let mut options = fs::OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o600);
            }
            let mut file = options.open(path)?;
            file.write_all(payload)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
