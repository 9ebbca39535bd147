//! ## HyperLogLog estimator
//! Estimates the number of distinct values in a stream of uniformly distributed 32-bit hashes,
//! using `m = 2^b` one-byte registers regardless of the true cardinality.
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! Each hashed `value` is split into two parts:
//! - 0..b bits     - register index `j`
//! - b..32 bits    - remainder whose leading zero run (plus one) is the register rank
//!
//! Register `j` keeps the maximum rank routed to it, so updates are monotonic and commutative.
//!
//! Estimates are derived from the harmonic mean of `2^-rank` with three regimes:
//! - `raw <= 2.5 * m` with empty registers: linear counting `m * ln(m / zeros)`
//! - `raw > 2^32 / 30`: large range correction `-2^32 * ln(1 - raw / 2^32)`
//! - otherwise: `raw` as is
//!
//! Expected relative error is `1.04 / sqrt(m)`:
//!   b = 4:  26.00%
//!   b = 10:  3.25%
//!   b = 12:  1.62%
//!   b = 16:  0.41%
//!
//! # Concurrency
//! `update` takes `&mut self`, so concurrent ingestion needs either external synchronization
//! or one estimator per thread whose registers are combined by the caller.

use std::fmt::{Debug, Formatter};
use std::mem::size_of;

use log::debug;

use crate::error::HyperLogLogError;

/// Smallest supported precision (16 registers)
pub const MIN_PRECISION: u8 = 4;
/// Largest supported precision (65536 registers)
pub const MAX_PRECISION: u8 = 16;
/// Precision used by `HyperLogLog::default()`
pub const DEFAULT_PRECISION: u8 = 12;

/// Bit width of hashed values accepted by `update`
const HASH_BITS: u32 = 32;
/// Size of the hash space, `2^32`
const HASH_SPACE: f64 = (1u64 << HASH_BITS) as f64;
/// Raw estimates up to `SMALL_RANGE_FACTOR * m` are candidates for linear counting
const SMALL_RANGE_FACTOR: f64 = 2.5;
/// Raw estimates above this threshold get corrected for hash collisions
const LARGE_RANGE_THRESHOLD: f64 = HASH_SPACE / 30.0;

/// HyperLogLog cardinality estimator over 32-bit hashed values.
#[derive(Clone, PartialEq, Eq)]
pub struct HyperLogLog {
    /// Precision: number of low bits used as register index
    b: u8,
    /// `2^b` registers storing maximum observed rank
    registers: Box<[u8]>,
}

impl HyperLogLog {
    /// Creates new estimator with `2^b` zeroed registers.
    ///
    /// Fails with `InvalidPrecision` unless `b` is in `[4..16]` range.
    pub fn new(b: u8) -> Result<Self, HyperLogLogError> {
        validate_precision(b)?;
        debug!("creating HyperLogLog with b = {}, m = {}", b, 1usize << b);
        Ok(Self::with_precision(b))
    }

    /// Restores estimator from a snapshot of its registers (see `registers`).
    pub fn from_registers(b: u8, registers: Vec<u8>) -> Result<Self, HyperLogLogError> {
        validate_precision(b)?;

        let expected = 1usize << b;
        if registers.len() != expected {
            return Err(HyperLogLogError::InvalidRegisterCount {
                expected,
                actual: registers.len(),
            });
        }

        let max = max_rank(b);
        if let Some((index, &rank)) = registers.iter().enumerate().find(|(_, &r)| r > max) {
            return Err(HyperLogLogError::InvalidRegisterRank { index, rank, max });
        }

        debug!("restored HyperLogLog with b = {} from registers", b);
        Ok(Self {
            b,
            registers: registers.into_boxed_slice(),
        })
    }

    /// Allocate zeroed registers, `b` must be already validated
    #[inline]
    fn with_precision(b: u8) -> Self {
        Self {
            b,
            registers: vec![0u8; 1 << b].into_boxed_slice(),
        }
    }

    /// Insert hashed value into estimator
    #[inline]
    pub fn update(&mut self, value: u32) {
        let (idx, rank) = self.decode(value);
        // SAFETY: `idx` is masked to `b` bits and `registers` holds exactly `2^b` elements.
        let register = unsafe { self.registers.get_unchecked_mut(idx) };
        *register = (*register).max(rank);
    }

    /// Return register index and rank of hashed value
    #[inline]
    fn decode(&self, value: u32) -> (usize, u8) {
        let idx = value & ((1 << self.b) - 1);
        // Remainder keeps `b` leading zeros after the shift, which are not part of the rank.
        let rank = (value >> self.b).leading_zeros() - u32::from(self.b) + 1;
        (idx as usize, rank as u8)
    }

    /// Return cardinality estimate
    pub fn estimate(&self) -> f64 {
        correct_estimate(self.m() as f64, self.raw_estimate(), || self.num_zeros())
    }

    /// Return uncorrected harmonic mean estimate `alpha * m^2 / sum(2^-rank)`
    pub fn raw_estimate(&self) -> f64 {
        let sum: f64 = self
            .registers
            .iter()
            .map(|&rank| 1.0 / (1u64 << rank) as f64)
            .sum();
        let m = self.m() as f64;
        self.alpha() * m * m / sum
    }

    /// Return bias correction constant for current number of registers
    #[inline]
    pub fn alpha(&self) -> f64 {
        alpha(self.m())
    }

    /// Return number of registers which haven't received any value yet
    pub fn num_zeros(&self) -> usize {
        self.registers.iter().filter(|&&rank| rank == 0).count()
    }

    /// Return precision parameter
    #[inline]
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Return number of registers
    #[inline]
    pub fn m(&self) -> usize {
        self.registers.len()
    }

    /// Return registers ranks
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Return maximum rank a register can hold for current precision
    #[inline]
    pub fn max_rank(&self) -> u8 {
        max_rank(self.b)
    }

    /// Return expected relative error `1.04 / sqrt(m)`
    #[inline]
    pub fn standard_error(&self) -> f64 {
        1.04 / (self.m() as f64).sqrt()
    }

    /// Return memory size of `HyperLogLog`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.registers.len()
    }
}

impl Default for HyperLogLog {
    fn default() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }
}

impl Extend<u32> for HyperLogLog {
    #[inline]
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for value in iter {
            self.update(value);
        }
    }
}

impl Debug for HyperLogLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ b: {}, zeros: {}, estimate: {:.2}, size: {} }}",
            self.b,
            self.num_zeros(),
            self.estimate(),
            self.size_of()
        )
    }
}

#[inline]
fn validate_precision(b: u8) -> Result<(), HyperLogLogError> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&b) {
        Ok(())
    } else {
        Err(HyperLogLogError::InvalidPrecision(b))
    }
}

/// Rank of an all-zero remainder
#[inline]
fn max_rank(b: u8) -> u8 {
    (HASH_BITS + 1) as u8 - b
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Apply small or large range correction to `raw` estimate of `m` registers.
///
/// `num_zeros` is only evaluated for small range estimates.
#[inline]
fn correct_estimate(m: f64, raw: f64, num_zeros: impl FnOnce() -> usize) -> f64 {
    if raw <= SMALL_RANGE_FACTOR * m {
        match num_zeros() {
            0 => raw,
            zeros => m * (m / zeros as f64).ln(),
        }
    } else if raw > LARGE_RANGE_THRESHOLD {
        // Saturated registers (raw >= 2^32) yield ln(0) = -inf, i.e. infinite estimate.
        -HASH_SPACE * (1.0 - raw / HASH_SPACE).max(0.0).ln()
    } else {
        raw
    }
}
