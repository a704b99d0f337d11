//! Error types for the calculator.
//!
//! The engine itself never fails; these only surface at the edges
//! (key scripts, config files).

use thiserror::Error;

/// Errors that can occur outside the calculator transitions.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Invalid digit: {0}")]
    InvalidDigit(char),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;
