//! Error types for commitlens-core

use thiserror::Error;

/// Main error type for the commitlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A commit whose precomputed temporal fields disagree with each other
    #[error("invalid commit {sha}: {reason}")]
    InvalidCommit { sha: String, reason: String },

    /// Input that is well-typed but unusable (e.g. a zero chunk size)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for commitlens-core
pub type Result<T> = std::result::Result<T, Error>;
