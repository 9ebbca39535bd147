//! `hll-estimator` is a Rust crate estimating the number of distinct elements in a stream
//! with memory independent of the stream's cardinality.
//!
//! This library implements the classic HyperLogLog sketch over caller supplied 32-bit hashes,
//! with linear counting for small cardinalities and hash space saturation correction for large ones.
//!
//! ```
//! use hll_estimator::HyperLogLog;
//!
//! let mut hll = HyperLogLog::new(12).unwrap();
//! for value in [0x8000_0000u32, 0x4000_0001, 0x8000_0000] {
//!     hll.update(value);
//! }
//! assert!((hll.estimate() - 2.0).abs() < 0.01);
//! ```
pub mod error;
pub mod hyperloglog;
#[cfg(feature = "with_serde")]
mod serde;

pub use error::HyperLogLogError;
pub use hyperloglog::HyperLogLog;
