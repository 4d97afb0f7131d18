//! Bloom filter sizing
//!
//! Formulas:
//! - bits_per_item = -ln(fpr) / ln(2)
//! - m = floor(bits_per_item) * n
//! - FPR = (1 - e^(-kn/m))^k      -- estimate for k hash functions
//! - k_opt = (m/n) * ln(2)
//!
//! The size formula ignores the actual hash count, so the configured rate is
//! a design target rather than a hard bound.

use std::f64::consts::LN_2;

use crate::error::FilterError;

/// Default target false positive rate
pub const FALSE_POSITIVE_RATE: f64 = 0.000_001;

/// Largest accepted target rate (one bit per item)
pub const MAX_FALSE_POSITIVE_RATE: f64 = 0.5;

/// Sizing derived for a capacity, rate and chain length
#[derive(Clone, Debug, PartialEq)]
pub struct SizingParams {
    /// Number of bits in the filter
    pub size_bits: usize,
    /// Whole bits reserved per expected item
    pub bits_per_item: usize,
    /// Expected false positive rate once `capacity` items are added
    pub expected_fpr: f64,
}

/// Optimal (fractional) bits per item for a target rate
pub fn bits_per_item(target_fpr: f64) -> f64 {
    -target_fpr.ln() / LN_2
}

/// Check that a target rate can size a filter
pub fn validate_fpr(target_fpr: f64) -> Result<(), FilterError> {
    if !target_fpr.is_finite() || target_fpr <= 0.0 || target_fpr > MAX_FALSE_POSITIVE_RATE {
        return Err(FilterError::InvalidFalsePositiveRate { rate: target_fpr });
    }
    Ok(())
}

/// Number of bits for `capacity` items at `target_fpr`
///
/// `floor(-ln(fpr) / ln(2)) * capacity`, e.g. 19 * capacity at 1e-6.
pub fn filter_size(capacity: usize, target_fpr: f64) -> Result<usize, FilterError> {
    if capacity == 0 {
        return Err(FilterError::InvalidCapacity { capacity });
    }
    validate_fpr(target_fpr)?;

    let per_item = bits_per_item(target_fpr).floor() as usize;
    if per_item == 0 {
        return Err(FilterError::InvalidFalsePositiveRate { rate: target_fpr });
    }

    per_item
        .checked_mul(capacity)
        .ok_or(FilterError::FilterTooLarge {
            capacity,
            bits_per_item: per_item,
        })
}

/// Full sizing for a capacity, rate and chain length
pub fn sizing_for(
    capacity: usize,
    target_fpr: f64,
    hash_count: usize,
) -> Result<SizingParams, FilterError> {
    let size_bits = filter_size(capacity, target_fpr)?;
    Ok(SizingParams {
        size_bits,
        bits_per_item: size_bits / capacity,
        expected_fpr: estimate_fpr(size_bits, capacity, hash_count),
    })
}

/// Estimate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn estimate_fpr(size_bits: usize, items: usize, hash_count: usize) -> f64 {
    if size_bits == 0 {
        return 1.0;
    }
    let exponent = -(hash_count as f64) * (items as f64) / (size_bits as f64);
    (1.0 - exponent.exp()).powi(hash_count as i32)
}

/// Optimal k for given m and n, clamped to [1, 32]
pub fn optimal_hash_count(size_bits: usize, items: usize) -> usize {
    if items == 0 {
        return 1;
    }
    let k = ((size_bits as f64 / items as f64) * LN_2).round() as usize;
    k.clamp(1, 32)
}
