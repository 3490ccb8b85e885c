//! Error types for slothtools

use thiserror::Error;

/// Main error type for slothtools operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Nothing in the current selection can be processed by the operator.
    #[error("{0}")]
    NoEligibleInput(String),

    /// The object cannot be switched into edit mode (linked or locked data).
    #[error("Object '{object}' cannot enter edit mode")]
    NotEditable { object: String },

    #[error("Unknown object: {0}")]
    UnknownObject(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for slothtools operations
pub type Result<T> = std::result::Result<T, Error>;
