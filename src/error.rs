use thiserror::Error;

use crate::hyperloglog::{MAX_PRECISION, MIN_PRECISION};

/// Errors returned when building a `HyperLogLog` estimator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HyperLogLogError {
    /// Precision `b` is outside of the supported `[4..16]` range.
    #[error("precision {0} is out of range [{min}..{max}]", min = MIN_PRECISION, max = MAX_PRECISION)]
    InvalidPrecision(u8),
    /// Register snapshot length doesn't match `2^b`.
    #[error("expected {expected} registers, got {actual}")]
    InvalidRegisterCount { expected: usize, actual: usize },
    /// Register snapshot holds a rank no 32-bit value can produce.
    #[error("register {index} has rank {rank}, maximum is {max}")]
    InvalidRegisterRank { index: usize, rank: u8, max: u8 },
}
