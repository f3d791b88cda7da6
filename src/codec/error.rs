//! Codec error taxonomy.

use thiserror::Error;

/// Broad class of a codec failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token or character counts.
    Format,
    /// A word absent from the dictionary.
    UnknownWord,
    /// An index outside 0..=0x7FF.
    Range,
}

/// Errors raised by the mnemonic and compact hex codecs.
///
/// A checksum mismatch is not an error: decoding reports it as a flag so
/// callers can tell malformed input from a well-formed but wrong mnemonic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid word count {got}: expected {expected}")]
    InvalidWordCount { got: usize, expected: String },

    #[error("unknown word {word:?} at position {position}")]
    UnknownWord { word: String, position: usize },

    #[error("hex length {len} is not a positive multiple of 3")]
    InvalidHexLength { len: usize },

    #[error("invalid hex digit {found:?} at offset {offset}")]
    InvalidHexDigit { found: char, offset: usize },

    #[error("unexpected \"0x\" prefix: remove it and enter bare hex digits, 3 per word")]
    HexPrefix,

    #[error("index {value:#05x} at position {position} exceeds 0x7ff")]
    IndexOutOfRange { value: u32, position: usize },
}

impl CodecError {
    /// Returns the taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::InvalidWordCount { .. }
            | CodecError::InvalidHexLength { .. }
            | CodecError::InvalidHexDigit { .. }
            | CodecError::HexPrefix => ErrorKind::Format,
            CodecError::UnknownWord { .. } => ErrorKind::UnknownWord,
            CodecError::IndexOutOfRange { .. } => ErrorKind::Range,
        }
    }
}
