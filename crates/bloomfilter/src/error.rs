//! Error types for the Bloom filter crate

use thiserror::Error;

use crate::domain::HashFunction;

/// Errors that can occur while building or feeding a Bloom filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid capacity: {capacity} (must be greater than 0)")]
    InvalidCapacity { capacity: usize },

    #[error("Invalid false positive rate: {rate} (must be in (0, 0.5])")]
    InvalidFalsePositiveRate { rate: f64 },

    #[error("Filter size overflows: {capacity} items * {bits_per_item} bits per item")]
    FilterTooLarge { capacity: usize, bits_per_item: usize },

    #[error("Hash chain must contain at least one hash function")]
    EmptyHashChain,

    #[error("Hash chain contains a duplicate hash function: {0:?}")]
    DuplicateHashFunction(HashFunction),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Hash function {function} failed: {reason}")]
    HashFailure {
        function: &'static str,
        reason: String,
    },

    #[error("Incompatible filters: {0}")]
    IncompatibleFilters(String),

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),
}
