//! Error types for worldswitch
//!
//! Provides a unified error type used across all worldswitch crates.

use std::path::PathBuf;

/// Main error type for worldswitch operations
#[derive(Debug, thiserror::Error)]
pub enum WorldSwitchError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // === Connection Errors ===

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Connection closed unexpectedly")]
    ConnectionClosed,

    // === Protocol Errors ===

    #[error("Protocol error: {0}")]
    Protocol(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    // === World Control Errors ===

    #[error("World control error: {0}")]
    WorldControl(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorldSwitchError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a world control error
    pub fn world_control(msg: impl Into<String>) -> Self {
        Self::WorldControl(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using [`WorldSwitchError`]
pub type Result<T> = std::result::Result<T, WorldSwitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorldSwitchError::connection("refused");
        assert_eq!(err.to_string(), "Connection failed: refused");

        let err = WorldSwitchError::ConfigInvalid {
            path: PathBuf::from("worldswitch.toml"),
            message: "bad port".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration at worldswitch.toml: bad port"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: WorldSwitchError = io.into();
        assert!(matches!(err, WorldSwitchError::Io(_)));
    }
}
