//! `lockbox completions <shell>`: print a shell completion script.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command, writing the script to `out`.
pub fn execute(shell: Shell, out: &mut dyn io::Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(())
}
