//! Error types for Cryptoplex
//!
//! Configuration and construction errors shared by every crate in the
//! workspace. Data conditions (empty windows, single-state windows) are not
//! errors; they surface as missing or zero-valued scores instead.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for Cryptoplex operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for Cryptoplex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Unrecognized selector (time scale, window mode, complexity type)
    #[error("Invalid configuration: '{value}' is not one of [{allowed}]")]
    InvalidConfiguration { value: String, allowed: String },

    /// Percentile cut points outside (0, 100) or not strictly increasing
    #[error("Invalid percentiles: {0}")]
    InvalidPercentiles(String),

    /// Label set does not match the number of cut points
    #[error("Label count mismatch: expected {expected} labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    /// Timestamps must be strictly increasing within a series
    #[error("Non-increasing timestamp: {next} does not follow {previous}")]
    NonIncreasingTimestamp {
        previous: NaiveDate,
        next: NaiveDate,
    },

    /// Entity registered twice in a panel
    #[error("Duplicate entity: {0}")]
    DuplicateEntity(String),

    /// Numeric parameter out of range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl CoreError {
    /// Build an `InvalidConfiguration` error from a value and its allowed set.
    pub fn invalid_selector(value: &str, allowed: &[&str]) -> Self {
        CoreError::InvalidConfiguration {
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}
