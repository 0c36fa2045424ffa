//! The encrypted single-file store.
//!
//! This module provides:
//! - Binary container layout and codec (`format`)
//! - Crash-safe create/replace file writes (`atomic`)
//! - High-level `Store` for create, open, save and rekey (`store`)

pub mod atomic;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use format::{inspect, Container, ContainerInfo, CURRENT_VERSION, HEADER_LEN};
pub use store::Store;
