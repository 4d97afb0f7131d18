//! Bloom filter configuration and validation
//!
//! # Example
//!
//! ```
//! use bloomfilter::{FilterConfigBuilder, HashFunction};
//!
//! let config = FilterConfigBuilder::new()
//!     .false_positive_rate(0.001)
//!     .hash_chain(vec![
//!         HashFunction::Murmur3 { seed: 7 },
//!         HashFunction::Sha256 { salt: 7 },
//!     ])
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.hash_chain.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use super::hash_functions::{default_functions, validate_chain, HashChain, HashFunction};
use super::parameters::{validate_fpr, FALSE_POSITIVE_RATE};
use crate::error::FilterError;

/// Bloom filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Target false positive rate, in (0, 0.5]
    pub false_positive_rate: f64,
    /// Ordered hash functions; must be non-empty and duplicate-free
    pub hash_chain: Vec<HashFunction>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            false_positive_rate: FALSE_POSITIVE_RATE,
            hash_chain: default_functions(),
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(
        false_positive_rate: f64,
        hash_chain: Vec<HashFunction>,
    ) -> Result<Self, FilterError> {
        let config = Self {
            false_positive_rate,
            hash_chain,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        validate_fpr(self.false_positive_rate)?;
        validate_chain(&self.hash_chain)
    }

    /// Build the validated hash chain this configuration describes
    pub fn chain(&self) -> Result<HashChain, FilterError> {
        HashChain::new(self.hash_chain.clone())
    }

    /// Builder-style method to set the target rate
    pub fn with_false_positive_rate(mut self, rate: f64) -> Self {
        self.false_positive_rate = rate;
        self
    }

    /// Builder-style method to set the hash chain
    pub fn with_hash_chain(mut self, functions: Vec<HashFunction>) -> Self {
        self.hash_chain = functions;
        self
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    false_positive_rate: Option<f64>,
    hash_chain: Option<Vec<HashFunction>>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target false positive rate
    pub fn false_positive_rate(mut self, rate: f64) -> Self {
        self.false_positive_rate = Some(rate);
        self
    }

    /// Replace the whole hash chain
    pub fn hash_chain(mut self, functions: Vec<HashFunction>) -> Self {
        self.hash_chain = Some(functions);
        self
    }

    /// Append one function to the chain (starting from an empty chain)
    pub fn hash_function(mut self, function: HashFunction) -> Self {
        self.hash_chain.get_or_insert_with(Vec::new).push(function);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    fn build_unchecked(self) -> FilterConfig {
        let defaults = FilterConfig::default();

        FilterConfig {
            false_positive_rate: self
                .false_positive_rate
                .unwrap_or(defaults.false_positive_rate),
            hash_chain: self.hash_chain.unwrap_or(defaults.hash_chain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FilterConfig::default();
        assert_eq!(config.false_positive_rate, FALSE_POSITIVE_RATE);
        assert_eq!(config.hash_chain.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_bad_rate() {
        let config = FilterConfig::default().with_false_positive_rate(0.9);
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidFalsePositiveRate { .. })
        ));

        let result = FilterConfig::new(0.0, default_functions());
        assert!(matches!(
            result,
            Err(FilterError::InvalidFalsePositiveRate { .. })
        ));
    }

    #[test]
    fn test_config_validation_rejects_duplicate_functions() {
        let config = FilterConfig::default().with_hash_chain(vec![
            HashFunction::Sha256 { salt: 1 },
            HashFunction::Sha256 { salt: 1 },
        ]);
        assert!(matches!(
            config.validate(),
            Err(FilterError::DuplicateHashFunction(_))
        ));
    }

    #[test]
    fn test_builder_creates_valid_config() {
        let config = FilterConfigBuilder::new()
            .false_positive_rate(0.01)
            .hash_function(HashFunction::Murmur3 { seed: 1 })
            .hash_function(HashFunction::Murmur3 { seed: 2 })
            .build()
            .expect("Should create valid config");

        assert_eq!(config.false_positive_rate, 0.01);
        assert_eq!(
            config.hash_chain,
            vec![
                HashFunction::Murmur3 { seed: 1 },
                HashFunction::Murmur3 { seed: 2 }
            ]
        );
        assert_eq!(config.chain().unwrap().len(), 2);
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = FilterConfigBuilder::new()
            .false_positive_rate(0.05)
            .build()
            .expect("Should use defaults for other fields");

        assert_eq!(config.hash_chain, FilterConfig::default().hash_chain);
    }

    #[test]
    fn test_builder_rejects_empty_chain() {
        let result = FilterConfigBuilder::new().hash_chain(Vec::new()).build();
        assert!(matches!(result, Err(FilterError::EmptyHashChain)));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "false_positive_rate": 0.001,
            "hash_chain": [
                {"algorithm": "murmur3", "seed": 0},
                {"algorithm": "sha256", "salt": 5}
            ]
        }"#;
        let config: FilterConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.false_positive_rate, 0.001);
        assert_eq!(config.hash_chain[1], HashFunction::Sha256 { salt: 5 });
    }

    #[test]
    fn test_config_from_partial_json_falls_back_to_defaults() {
        let config: FilterConfig = serde_json::from_str(r#"{"false_positive_rate": 0.01}"#).unwrap();
        assert_eq!(config.hash_chain, default_functions());
    }
}
