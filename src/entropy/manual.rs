//! Entropy typed in by hand as hex.

use hex::FromHexError;
use zeroize::Zeroize;

use super::{Entropy, EntropyError};

/// Parses `input` as exactly `required_bytes` bytes of hex entropy.
///
/// Surrounding whitespace is ignored; either letter case is accepted.
pub fn parse_hex(input: &str, required_bytes: usize) -> Result<Entropy, EntropyError> {
    let input = input.trim();
    let mut bytes = hex::decode(input).map_err(|e| match e {
        FromHexError::OddLength => EntropyError::OddHexLength { len: input.len() },
        FromHexError::InvalidHexCharacter { c, index } => EntropyError::InvalidHexCharacter {
            found: c,
            offset: index,
        },
        FromHexError::InvalidStringLength => EntropyError::HexLengthMismatch {
            expected: required_bytes * 2,
            got: input.len(),
        },
    })?;

    if bytes.len() != required_bytes {
        bytes.zeroize();
        return Err(EntropyError::HexLengthMismatch {
            expected: required_bytes * 2,
            got: input.len(),
        });
    }
    Entropy::new(bytes)
}
