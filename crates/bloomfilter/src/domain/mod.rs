//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Core Bloom filter implementation
//! - Hash chain
//! - Canonical value encoding
//! - Parameter calculations
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod config;
pub mod encoding;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder};
pub use encoding::encode;
pub use hash_functions::{HashChain, HashFunction};
pub use parameters::{
    estimate_fpr, filter_size, optimal_hash_count, sizing_for, SizingParams, FALSE_POSITIVE_RATE,
};
