//! Core Bloom filter implementation
//!
//! INVARIANTS:
//! - Bits only ever flip from 0 to 1; nothing resets them
//! - size = floor(-ln(fpr) / ln(2)) * capacity, fixed at construction
//! - No false negatives - if added, might_contain() MUST return true

use bitvec::prelude::*;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::config::FilterConfig;
use super::encoding::encode;
use super::hash_functions::HashChain;
use super::parameters::{estimate_fpr, filter_size, FALSE_POSITIVE_RATE};
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not.
///
/// `add` needs `&mut self`; sharing one filter between threads requires an
/// external lock such as `RwLock<BloomFilter>`.
#[derive(Clone, Debug)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Size in bits (m)
    size: usize,
    /// Hash functions, one bit position each (k)
    hash_chain: HashChain,
    /// Expected number of distinct items
    capacity: usize,
    /// Number of successful add() calls (n)
    items_added: usize,
    /// Design target the size was computed from
    false_positive_rate: f64,
}

impl BloomFilter {
    /// Create a filter sized for `capacity` items at [`FALSE_POSITIVE_RATE`]
    /// with the default hash chain
    pub fn new(capacity: usize) -> Result<Self, FilterError> {
        Self::build(capacity, FALSE_POSITIVE_RATE, HashChain::default())
    }

    /// Create a filter from a validated configuration
    pub fn with_config(capacity: usize, config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Self::build(capacity, config.false_positive_rate, config.chain()?)
    }

    fn build(
        capacity: usize,
        false_positive_rate: f64,
        hash_chain: HashChain,
    ) -> Result<Self, FilterError> {
        let size = filter_size(capacity, false_positive_rate)?;

        debug!(
            capacity,
            size,
            hash_count = hash_chain.len(),
            false_positive_rate,
            "Created bloom filter"
        );

        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; size],
            size,
            hash_chain,
            capacity,
            items_added: 0,
            false_positive_rate,
        })
    }

    /// Add a value to the filter
    ///
    /// After a successful add, `might_contain(value)` is guaranteed to return
    /// true. A value that cannot be serialised is reported as
    /// [`FilterError::SerializationError`] and leaves the filter untouched.
    pub fn add<T>(&mut self, value: &T) -> Result<bool, FilterError>
    where
        T: Serialize + ?Sized,
    {
        let positions = self.positions(value)?;
        for pos in positions {
            self.bits.set(pos, true);
        }

        self.items_added += 1;
        if self.items_added == self.capacity + 1 {
            warn!(
                capacity = self.capacity,
                size = self.size,
                "Bloom filter is past its capacity, false positive rate will exceed target"
            );
        }
        trace!(items_added = self.items_added, "Added value to bloom filter");

        Ok(true)
    }

    /// Test if a value might be in the filter
    ///
    /// Returns:
    /// - `true` if the value might be in the set (could be false positive)
    /// - `false` if the value is definitely NOT in the set (never false negative)
    pub fn might_contain<T>(&self, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let bytes = match encode(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                // Such a value could never have been added
                warn!(error = %e, "Cannot encode queried value, reporting absent");
                return false;
            }
        };

        for function in self.hash_chain.iter() {
            match function.index(&bytes, self.size) {
                Ok(pos) if self.bits[pos] => continue,
                Ok(_) => return false,
                Err(e) => {
                    warn!(function = function.name(), error = %e, "Hash failed during lookup");
                    return false;
                }
            }
        }
        true
    }

    /// Bit positions a value maps to, in chain order
    pub fn positions<T>(&self, value: &T) -> Result<Vec<usize>, FilterError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = encode(value)?;
        self.hash_chain.positions(&bytes, self.size)
    }

    /// Merge another filter into this one (OR operation)
    ///
    /// After the union this filter matches every value added to either one.
    /// Both filters must have the same size and hash chain.
    pub fn union(&mut self, other: &BloomFilter) -> Result<(), FilterError> {
        if self.size != other.size {
            return Err(FilterError::IncompatibleFilters(format!(
                "size {} != {}",
                self.size, other.size
            )));
        }
        if self.hash_chain != other.hash_chain {
            return Err(FilterError::IncompatibleFilters(
                "hash chains differ".to_string(),
            ));
        }

        let self_raw = self.bits.as_raw_mut_slice();
        let other_raw = other.bits.as_raw_slice();
        for (s, o) in self_raw.iter_mut().zip(other_raw.iter()) {
            *s |= *o;
        }
        self.items_added += other.items_added;

        debug!(
            size = self.size,
            items_added = self.items_added,
            "Merged bloom filters"
        );
        Ok(())
    }

    /// Get the filter size in bits
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.hash_chain.len()
    }

    pub fn hash_chain(&self) -> &HashChain {
        &self.hash_chain
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of values added (duplicates included)
    pub fn items_added(&self) -> usize {
        self.items_added
    }

    /// Configured target false positive rate
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Estimate the current false positive rate
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn estimated_false_positive_rate(&self) -> f64 {
        estimate_fpr(self.size, self.items_added, self.hash_count())
    }
}
