//! Common error types for Passboard

use thiserror::Error;

/// Common result type for Passboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Passboard crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
