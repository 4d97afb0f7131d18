//! Hash chain for the Bloom filter
//!
//! Each value is addressed by k bit positions, one per hash function in the
//! chain. The default chain uses three unrelated algorithms (MurmurHash3,
//! SipHash-1-3, SHA-256) so the positions stay decorrelated. A chain made of
//! k copies of the same function collapses to a single effective hash, so
//! duplicates are rejected when the chain is built.
//!
//! All functions are stateless: a digest is a pure function of the input
//! bytes and the function's seed/key/salt.

use std::collections::HashSet;
use std::hash::Hasher;
use std::io::Cursor;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use siphasher::sip128::{Hasher128, SipHasher13};

use crate::error::FilterError;

/// Width in bytes of the digest prefix read as a signed index source
pub const INDEX_WIDTH: usize = 8;

/// Default SipHash keys (the reference test-vector key 00..0f)
pub const DEFAULT_SIPHASH_KEYS: (u64, u64) = (0x0706_0504_0302_0100, 0x0f0e_0d0c_0b0a_0908);

/// A single hash function of the chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum HashFunction {
    /// MurmurHash3 x64 128-bit with a seed
    Murmur3 { seed: u32 },
    /// SipHash-1-3 128-bit with a 128-bit key
    #[serde(rename = "siphash13")]
    SipHash13 { key0: u64, key1: u64 },
    /// SHA-256 over `salt (big-endian) || bytes`
    Sha256 { salt: u32 },
}

impl HashFunction {
    /// Short algorithm name, used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            HashFunction::Murmur3 { .. } => "murmur3_x64_128",
            HashFunction::SipHash13 { .. } => "siphash13_128",
            HashFunction::Sha256 { .. } => "sha256",
        }
    }

    /// Compute the digest of `bytes`
    ///
    /// Every digest is at least [`INDEX_WIDTH`] bytes long.
    pub fn digest(&self, bytes: &[u8]) -> Result<Vec<u8>, FilterError> {
        match *self {
            HashFunction::Murmur3 { seed } => {
                let mut cursor = Cursor::new(bytes);
                let hash = murmur3::murmur3_x64_128(&mut cursor, seed).map_err(|e| {
                    FilterError::HashFailure {
                        function: self.name(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(hash.to_be_bytes().to_vec())
            }
            HashFunction::SipHash13 { key0, key1 } => {
                let mut hasher = SipHasher13::new_with_keys(key0, key1);
                hasher.write(bytes);
                Ok(hasher.finish128().as_bytes().to_vec())
            }
            HashFunction::Sha256 { salt } => {
                let mut hasher = Sha256::new();
                hasher.update(salt.to_be_bytes());
                hasher.update(bytes);
                Ok(hasher.finalize().to_vec())
            }
        }
    }

    /// Map `bytes` to a bit index in `[0, size)`
    ///
    /// The first [`INDEX_WIDTH`] digest bytes are read as a big-endian `i64`,
    /// its absolute value is reduced modulo `size`. `unsigned_abs` keeps
    /// `i64::MIN` from overflowing.
    pub fn index(&self, bytes: &[u8], size: usize) -> Result<usize, FilterError> {
        if size == 0 {
            return Err(FilterError::InvalidParameters(
                "cannot index into a zero-sized filter".to_string(),
            ));
        }

        let digest = self.digest(bytes)?;
        let head: [u8; INDEX_WIDTH] = digest
            .get(..INDEX_WIDTH)
            .and_then(|prefix| prefix.try_into().ok())
            .ok_or_else(|| FilterError::HashFailure {
                function: self.name(),
                reason: format!("digest shorter than {} bytes", INDEX_WIDTH),
            })?;

        let magnitude = i64::from_be_bytes(head).unsigned_abs();
        Ok((magnitude % size as u64) as usize)
    }
}

/// Ordered, duplicate-free list of hash functions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashChain {
    functions: Vec<HashFunction>,
}

impl HashChain {
    /// Build a chain from an ordered list of functions
    ///
    /// Rejects an empty list and any repeated function.
    pub fn new(functions: Vec<HashFunction>) -> Result<Self, FilterError> {
        validate_chain(&functions)?;
        Ok(Self { functions })
    }

    /// Number of hash functions (k)
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Always false for a validated chain
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashFunction> {
        self.functions.iter()
    }

    /// Compute the k bit positions for `bytes`, in chain order
    pub fn positions(&self, bytes: &[u8], size: usize) -> Result<Vec<usize>, FilterError> {
        self.functions
            .iter()
            .map(|function| function.index(bytes, size))
            .collect()
    }
}

impl Default for HashChain {
    fn default() -> Self {
        Self {
            functions: default_functions(),
        }
    }
}

/// The default three-algorithm chain
pub fn default_functions() -> Vec<HashFunction> {
    let (key0, key1) = DEFAULT_SIPHASH_KEYS;
    vec![
        HashFunction::Murmur3 { seed: 0 },
        HashFunction::SipHash13 { key0, key1 },
        HashFunction::Sha256 { salt: 0 },
    ]
}

/// Check that a list of functions forms a usable chain
pub fn validate_chain(functions: &[HashFunction]) -> Result<(), FilterError> {
    if functions.is_empty() {
        return Err(FilterError::EmptyHashChain);
    }

    let mut seen = HashSet::with_capacity(functions.len());
    for function in functions {
        if !seen.insert(function) {
            return Err(FilterError::DuplicateHashFunction(*function));
        }
    }
    Ok(())
}
