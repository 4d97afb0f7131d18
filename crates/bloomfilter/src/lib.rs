//! # bloomfilter
//!
//! Probabilistic set membership: "have I probably seen this before?"
//! without storing the dataset.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BloomFilter`: bit array + hash chain, `add` / `might_contain`
//!   - `HashChain`: ordered, duplicate-free hash functions (MurmurHash3,
//!     SipHash-1-3, SHA-256 by default)
//!   - `encode`: canonical bytes for any `serde::Serialize` value
//!   - `FilterConfig` / `FilterConfigBuilder`: tunable rate and chain
//!
//! - **Errors** (`error`): `FilterError`
//!
//! ## Invariants
//!
//! - size = floor(-ln(fpr) / ln(2)) * capacity
//! - No false negatives - if added, might_contain() MUST return true
//! - Bits are never cleared
//!
//! ## Usage Example
//!
//! ```
//! use bloomfilter::BloomFilter;
//!
//! let mut filter = BloomFilter::new(10_000)?;
//! assert_eq!(filter.size(), 190_000);
//!
//! filter.add("Trieu")?;
//! assert!(filter.might_contain("Trieu"));
//! assert!(!filter.might_contain("TRiEU"));
//! # Ok::<(), bloomfilter::FilterError>(())
//! ```
//!
//! ## Concurrency
//!
//! The filter does no internal locking. Wrap it in a `Mutex` or `RwLock`
//! to share it between threads.

pub mod domain;
pub mod error;

// Re-exports for convenience
pub use domain::{
    BloomFilter, FilterConfig, FilterConfigBuilder, HashChain, HashFunction, FALSE_POSITIVE_RATE,
};
pub use error::FilterError;
