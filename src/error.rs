//! # Error Types
//!
//! Custom error types for Excavator Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Excavator Bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Controller errors (open, event read, disconnect)
    #[error("Controller error: {0}")]
    Controller(String),

    /// No Switch Pro Controller found on the system
    #[error("No Switch Pro Controller found under /dev/input")]
    ControllerNotFound,

    /// rosbridge transport errors (connect, send, close)
    #[error("Bridge error: {0}")]
    Bridge(String),

    /// A control action bound to a nonexistent input index
    #[error("Invalid binding: {0}")]
    InvalidBinding(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Excavator Bridge
pub type Result<T> = std::result::Result<T, BridgeError>;
