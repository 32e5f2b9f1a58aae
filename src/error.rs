//! Error type shared by every statistic in [`crate::stats`].

use thiserror::Error;

/// Errors returned when a statistic is undefined for the given sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatsError {
    /// The sample contains no values.
    #[error("at least one value is required")]
    EmptyInput,

    /// The sample is too small for the statistic (e.g. sample variance
    /// divides by `n - 1`).
    #[error("at least {required} values are required, got {actual}")]
    InsufficientData {
        /// Minimum number of values the statistic needs.
        required: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Two values in the sample have no defined order (e.g. a NaN).
    #[error("sample contains values that cannot be ordered")]
    Unordered,
}

/// Result type for statistics calculations.
pub type StatsResult<T> = Result<T, StatsError>;
