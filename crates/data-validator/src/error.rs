//! Validation Error Types

use thiserror::Error;

/// Errors raised while validating a raw prediction record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Field present but not coercible to a finite number
    #[error("{field} must be a number, got {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// Numeric field outside its allowed domain
    #[error("{field} value {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// String field not one of its literal values
    #[error("{field} must be one of {expected:?}, got {value:?}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: [&'static str; 2],
    },

    /// Timestamp not in `YYYY-MM-DDTHH:MM` form
    #[error("Invalid timestamp {0:?}: expected YYYY-MM-DDTHH:MM")]
    InvalidTimestamp(String),
}
