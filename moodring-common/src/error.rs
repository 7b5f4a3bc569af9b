//! Common error types for Moodring

use thiserror::Error;

/// Common result type for Moodring operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Moodring services
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed artifact or config document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid caller input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Classifier artifact is inconsistent or failed to evaluate
    #[error("Model error: {0}")]
    Model(String),
}
