//! # u-descriptive
//!
//! Descriptive statistics over a finite sample.
//!
//! Every operation is a pure function of a borrowed slice: nothing is
//! cached, nothing is mutated, and every call is safe to run concurrently.
//!
//! ## Modules
//!
//! - [`stats`] — mean, median variants, mode, variance and standard deviation
//! - [`error`] — [`StatsError`], returned when a statistic is undefined
//!
//! ## Design Philosophy
//!
//! - **Explicit promotion**: arithmetic results are always `f64`, whatever
//!   the element type
//! - **Errors, not panics**: empty or undersized samples yield a
//!   [`StatsError`]
//! - **Property-based testing**: ordering and purity invariants verified via
//!   proptest
//!
//! ## Example
//!
//! ```
//! use u_descriptive::{mean, median_high, median_low, pstdev, StatsError};
//!
//! let data = [1, 2, 3, 4];
//! assert_eq!(mean(&data)?, 2.5);
//! assert_eq!(median_low(&data)?, 2);
//! assert_eq!(median_high(&data)?, 3);
//! assert!((pstdev(&data)? - 1.118033988749895).abs() < 1e-15);
//! # Ok::<(), StatsError>(())
//! ```

pub mod error;
pub mod stats;

pub use error::{StatsError, StatsResult};
pub use stats::{
    mean, median, median_high, median_low, mode, pstdev, pvariance, stdev, variance, Median,
};
