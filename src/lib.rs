pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;

pub use errors::{LockboxError, Result};
pub use vault::Store;
