//! Error types shared by every stage of the logic force pipeline.

use thiserror::Error;

/// Errors raised by the logic force pipeline.
#[derive(Debug, Error)]
pub enum LftError {
    /// A numeric parameter (qubit count, force, threshold, weight) is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A state vector fails the normalization invariant.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Post-encoding normalization check failed.
    #[error("coherence violation: {0}")]
    CoherenceViolation(String),

    /// An operation received an empty vector or collection it cannot work with.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Two vectors or a vector and an operator have incompatible sizes.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for logic force operations.
pub type LftResult<T> = Result<T, LftError>;
