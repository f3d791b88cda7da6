//! Offline BIP39 Mnemonic Codec
//!
//! Converts raw entropy into checksummed word sequences and back, repairs
//! the final word of a 24-word mnemonic, and packs word indices into a
//! compact fixed-width hex form.
//!
//! # Architecture
//!
//! ```text
//! entropy (secure | dice | hex) → codec::MnemonicCodec → words
//!                                        ↑                  ↕
//!                               dictionary (2048 words)   codec::HexCodec
//! ```
//!
//! The [`Dictionary`] is loaded once and shared by reference. Every codec
//! operation is a pure function of its input and the dictionary; the only
//! stateful piece is a [`DiceExtractor`], scoped to one generation.
//!
//! # Design Principles
//!
//! - **Unbiased dice**: rolls are rejection-sampled, never reduced modulo 256
//! - **Checksum as a verdict**: a wrong checksum is a `false`, not an error
//! - **Deterministic repair**: the missing bits of a last word are zero-filled
//! - **Secrets are wiped**: entropy, indices and phrases are zeroized on drop
//!
//! # Example
//!
//! ```
//! use mnemonic_codec::{Dictionary, Entropy, HexCodec, MnemonicCodec};
//!
//! let dictionary = Dictionary::english();
//! let codec = MnemonicCodec::new(&dictionary);
//!
//! let entropy = Entropy::new(vec![0u8; 16]).unwrap();
//! let mnemonic = codec.encode(&entropy);
//! assert_eq!(
//!     mnemonic.to_string(),
//!     "abandon abandon abandon abandon abandon abandon \
//!      abandon abandon abandon abandon abandon about"
//! );
//!
//! let words: Vec<&str> = mnemonic.words().collect();
//! assert!(codec.validate(&words).unwrap());
//!
//! let hex = HexCodec::new(&dictionary).encode(&words).unwrap();
//! assert_eq!(hex.len(), 36);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod codec;
pub mod config;
pub mod dictionary;
pub mod entropy;
pub mod session;

// Re-export commonly used types at crate root
pub use analysis::{QualityThresholds, StatisticalTests, ThresholdViolation};
pub use codec::{CodecError, Decoded, ErrorKind, HexCodec, Mnemonic, MnemonicCodec, WordCount};
pub use config::{ConfigError, FileConfig, SourceKind};
pub use dictionary::{Dictionary, DictionaryError};
pub use entropy::{DiceExtractor, DiceProgress, Entropy, EntropyError};
pub use session::{Command, CommandError, Dispatcher, Reply, Session};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
