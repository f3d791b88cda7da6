//! Mnemonic and compact hex codecs.
//!
//! [`MnemonicCodec`] maps entropy to checksummed word sequences and back,
//! and repairs the final word of a 24-word mnemonic. [`HexCodec`] packs
//! word indices into fixed-width hex without interpreting them.

mod bits;
mod compact_hex;
mod error;
mod mnemonic;
mod word_count;

pub use compact_hex::{HexCodec, DIGITS_PER_WORD};
pub use error::{CodecError, ErrorKind};
pub use mnemonic::{Decoded, Mnemonic, MnemonicCodec};
pub use word_count::{WordCount, BITS_PER_WORD};
