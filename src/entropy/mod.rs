//! Entropy collection.
//!
//! Three sources produce mnemonic entropy:
//!
//! - **Secure random**: the operating system CSPRNG (or any `CryptoRng`).
//! - **Dice**: physical rolls converted to bytes by rejection sampling.
//! - **Manual hex**: entropy the user already holds, typed as hex.
//!
//! Every source yields an [`Entropy`] whose length is one of the BIP39
//! sizes (16, 20, 24, 28 or 32 bytes). Entropy buffers are wiped on drop.

mod dice;
mod manual;
mod secure;

pub use dice::{parse_rolls, DiceExtractor, DiceProgress, ROLLS_PER_BATCH};
pub use manual::parse_hex;
pub use secure::generate_secure;

use crate::codec::WordCount;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors raised while collecting entropy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// The secure random source failed. Fatal.
    #[error("secure random source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("invalid entropy length {got} bytes: expected 16, 20, 24, 28 or 32")]
    InvalidLength { got: usize },

    #[error("hex input has odd length {len}")]
    OddHexLength { len: usize },

    #[error("invalid hex character {found:?} at offset {offset}")]
    InvalidHexCharacter { found: char, offset: usize },

    #[error("expected {expected} hex characters, got {got}")]
    HexLengthMismatch { expected: usize, got: usize },

    /// Typed roll outside `1..=6`; `position` is a character offset.
    #[error("invalid dice roll {found:?} at position {position}: rolls must be 1-6")]
    InvalidRoll { found: char, position: usize },

    /// Fed roll value outside `1..=6`; `index` counts rolls in the fed slice.
    #[error("dice roll {value} at index {index} of the fed rolls: rolls must be 1-6")]
    RollOutOfRange { value: u8, index: usize },

    #[error("dice extraction incomplete: at least {rolls_needed} more rolls needed")]
    Incomplete { rolls_needed: usize },
}

impl EntropyError {
    /// True for errors that must end the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EntropyError::SourceUnavailable(_))
    }
}

/// Mnemonic entropy of a valid BIP39 length.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    word_count: WordCount,
}

impl Entropy {
    /// Wraps raw bytes, checking the length.
    pub fn new(mut bytes: Vec<u8>) -> Result<Self, EntropyError> {
        match WordCount::from_entropy_bytes(bytes.len()) {
            Some(word_count) => Ok(Self { bytes, word_count }),
            None => {
                let got = bytes.len();
                bytes.zeroize();
                Err(EntropyError::InvalidLength { got })
            }
        }
    }

    /// Wraps bytes whose length is already known to match `word_count`.
    pub(crate) fn with_word_count(bytes: Vec<u8>, word_count: WordCount) -> Self {
        debug_assert_eq!(bytes.len(), word_count.entropy_bytes());
        Self { bytes, word_count }
    }

    /// Copies a byte slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EntropyError> {
        Self::new(bytes.to_vec())
    }

    /// Returns the entropy bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the mnemonic length this entropy encodes to.
    #[inline]
    pub fn word_count(&self) -> WordCount {
        self.word_count
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: valid entropy is at least 16 bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entropy")
            .field("bytes", &self.bytes.len())
            .field("word_count", &self.word_count)
            .finish_non_exhaustive()
    }
}
