//! Project-level configuration (`.lockbox.toml`).

pub mod settings;

pub use settings::Settings;
