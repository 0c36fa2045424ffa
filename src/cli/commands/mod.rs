//! One module per `lockbox` subcommand.

pub mod cat;
pub mod completions;
pub mod info;
pub mod init;
pub mod rekey;
pub mod verify;
pub mod write;
