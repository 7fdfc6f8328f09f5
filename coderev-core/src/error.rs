//! Error types for coderev-core

use thiserror::Error;

/// Message shown to the user for every failed review, whatever the cause.
pub const REVIEW_FAILED_MESSAGE: &str =
    "Failed to get review from Gemini. Please check the log for more details.";

/// Result type alias for coderev-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for coderev-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The API key environment variable is not set
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The review call failed. The underlying cause is logged, not carried.
    #[error("{}", REVIEW_FAILED_MESSAGE)]
    ReviewFailed,
}
