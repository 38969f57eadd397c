//! worldswitch-utils: Common utilities shared across worldswitch crates
//!
//! This crate provides:
//! - Unified error types ([`WorldSwitchError`], [`Result`])
//! - Logging infrastructure ([`init_logging`])

pub mod error;
pub mod logging;

// Re-export main types at crate root for convenience
pub use error::{Result, WorldSwitchError};
pub use logging::init_logging;
