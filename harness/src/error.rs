//! Unified error handling for the harness.
//!
//! Serializer failures never reach this type: the runner turns them into
//! reported warnings. Only setup and output failures end the process.

use crate::config::ConfigError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the harness.
pub type Result<T> = std::result::Result<T, AppError>;
