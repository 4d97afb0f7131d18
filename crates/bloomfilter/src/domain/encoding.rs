//! Canonical byte encoding of inserted values
//!
//! Every hash function in the chain consumes the same byte sequence, so the
//! encoding must be deterministic: the same logical value of the same type
//! always yields identical bytes. bincode with fixed-width integers and
//! little-endian layout satisfies that, and `&str` / `String` / `Box<str>`
//! encode identically.

use bincode::Options;
use serde::Serialize;

use crate::error::FilterError;

/// Encode a value into its canonical byte representation
pub fn encode<T>(value: &T) -> Result<Vec<u8>, FilterError>
where
    T: Serialize + ?Sized,
{
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .serialize(value)
        .map_err(|e| FilterError::SerializationError(e.to_string()))
}
