//! Error types for lft-observability

use thiserror::Error;

/// Errors raised by the metrics recorder.
#[derive(Debug, Error, PartialEq)]
pub enum ObservabilityError {
    #[error("Invalid metric value: {0}")]
    InvalidValue(String),

    #[error("Metric not found: {0}")]
    MetricNotFound(String),
}

/// Result type for observability operations.
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
