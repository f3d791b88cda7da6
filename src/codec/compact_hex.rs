//! Fixed-width hex packing of word indices.
//!
//! Each index becomes exactly three lowercase hex digits, so a 24-word
//! mnemonic packs into 72 characters. The format carries no checksum of its
//! own and does not re-check the mnemonic's; it is a transparent packer.

use std::fmt::Write as _;

use zeroize::Zeroizing;

use super::error::CodecError;
use super::mnemonic::Mnemonic;
use crate::dictionary::Dictionary;

/// Hex digits per word.
pub const DIGITS_PER_WORD: usize = 3;

/// Largest value an 11-bit index can take.
const MAX_INDEX: u32 = 0x7FF;

/// Converts between word sequences and compact hex.
#[derive(Debug, Clone, Copy)]
pub struct HexCodec<'d> {
    dictionary: &'d Dictionary,
}

impl<'d> HexCodec<'d> {
    /// Creates a codec backed by `dictionary`.
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self { dictionary }
    }

    /// Packs words into `3 * words.len()` lowercase hex digits.
    pub fn encode<S: AsRef<str>>(&self, words: &[S]) -> Result<Zeroizing<String>, CodecError> {
        let mut out = Zeroizing::new(String::with_capacity(words.len() * DIGITS_PER_WORD));
        for (position, word) in words.iter().enumerate() {
            let word = word.as_ref();
            let index = self
                .dictionary
                .index_of(word)
                .ok_or_else(|| CodecError::UnknownWord {
                    word: word.to_string(),
                    position,
                })?;
            // Writing to a String cannot fail.
            let _ = write!(out, "{index:03x}");
        }
        Ok(out)
    }

    /// Packs an already-resolved mnemonic.
    pub fn encode_mnemonic(&self, mnemonic: &Mnemonic<'_>) -> Zeroizing<String> {
        let mut out = Zeroizing::new(String::with_capacity(mnemonic.len() * DIGITS_PER_WORD));
        for index in mnemonic.indices() {
            let _ = write!(out, "{index:03x}");
        }
        out
    }

    /// Unpacks hex into words.
    ///
    /// Surrounding whitespace is ignored and either letter case is accepted.
    /// A `0x` prefix is refused rather than stripped.
    pub fn decode(&self, hex: &str) -> Result<Mnemonic<'d>, CodecError> {
        let hex = hex.trim();
        if hex.starts_with("0x") || hex.starts_with("0X") {
            return Err(CodecError::HexPrefix);
        }
        let len = hex.chars().count();
        if len == 0 || len % DIGITS_PER_WORD != 0 {
            return Err(CodecError::InvalidHexLength { len });
        }
        if let Some((offset, found)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(CodecError::InvalidHexDigit { found, offset });
        }

        // All ASCII from here, so byte chunks line up with characters.
        let mut indices = Zeroizing::new(Vec::with_capacity(len / DIGITS_PER_WORD));
        for (position, group) in hex.as_bytes().chunks(DIGITS_PER_WORD).enumerate() {
            let value = group
                .iter()
                .fold(0u32, |acc, &digit| (acc << 4) | hex_value(digit));
            if value > MAX_INDEX {
                return Err(CodecError::IndexOutOfRange { value, position });
            }
            let index = value as u16;
            if self.dictionary.word(index).is_none() {
                return Err(CodecError::IndexOutOfRange { value, position });
            }
            indices.push(index);
        }

        tracing::debug!(words = indices.len(), "Decoded compact hex");
        Ok(Mnemonic::from_indices(self.dictionary, indices.to_vec()))
    }
}

fn hex_value(digit: u8) -> u32 {
    match digit {
        b'0'..=b'9' => u32::from(digit - b'0'),
        b'a'..=b'f' => u32::from(digit - b'a' + 10),
        b'A'..=b'F' => u32::from(digit - b'A' + 10),
        _ => 0,
    }
}
