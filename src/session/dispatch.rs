//! Single-input command execution.
//!
//! Each command is a pure function of the dictionary and one line of input.
//! Errors come back as values; the caller decides whether to print and
//! continue or to stop.

use zeroize::Zeroizing;

use super::command::Command;
use crate::codec::{CodecError, HexCodec, MnemonicCodec};
use crate::dictionary::Dictionary;
use crate::entropy::{Entropy, EntropyError};

/// Errors surfaced at the menu boundary.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error("invalid selection {0:?}")]
    InvalidSelection(String),

    #[error("{0:?} needs interactive input")]
    Interactive(Command),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// True for errors that must end the session.
    pub fn is_fatal(&self) -> bool {
        match self {
            CommandError::Entropy(e) => e.is_fatal(),
            CommandError::Io(_) => true,
            _ => false,
        }
    }
}

/// Result of a successful command.
#[derive(Debug)]
pub enum Reply {
    /// Checksum verdict.
    Validity(bool),
    /// A single computed word.
    LastWord(Zeroizing<String>),
    /// A complete word sequence.
    Mnemonic {
        /// Number of words in `phrase`.
        words: usize,
        /// Space-separated words.
        phrase: Zeroizing<String>,
    },
    /// Compact hex.
    Hex(Zeroizing<String>),
}

impl Reply {
    /// The bare result, without a label.
    pub fn payload(&self) -> &str {
        match self {
            Reply::Validity(true) => "valid",
            Reply::Validity(false) => "invalid",
            Reply::LastWord(word) => word,
            Reply::Mnemonic { phrase, .. } => phrase,
            Reply::Hex(hex) => hex,
        }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Validity(true) => write!(f, "Valid: checksum matches."),
            Reply::Validity(false) => write!(f, "Invalid: checksum mismatch."),
            Reply::LastWord(word) => write!(f, "Last word: {}", word.as_str()),
            Reply::Mnemonic { words, phrase } => {
                write!(f, "{words}-word mnemonic:\n{}", phrase.as_str())
            }
            Reply::Hex(hex) => write!(f, "Hex ({} chars):\n{}", hex.len(), hex.as_str()),
        }
    }
}

/// Lowercases, treats commas as separators, and splits on whitespace.
pub fn normalize_words(input: &str) -> Zeroizing<Vec<String>> {
    let cleaned = Zeroizing::new(input.replace(',', " ").to_lowercase());
    Zeroizing::new(cleaned.split_whitespace().map(str::to_string).collect())
}

/// Runs commands against one dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'d> {
    mnemonic: MnemonicCodec<'d>,
    hex: HexCodec<'d>,
}

impl<'d> Dispatcher<'d> {
    /// Creates a dispatcher over `dictionary`.
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            mnemonic: MnemonicCodec::new(dictionary),
            hex: HexCodec::new(dictionary),
        }
    }

    /// Runs a single-input command.
    ///
    /// Generate and Quit are driven by the session and are rejected here.
    pub fn execute(&self, command: Command, input: &str) -> Result<Reply, CommandError> {
        tracing::debug!(?command, "Executing command");
        match command {
            Command::Validate => {
                let words = normalize_words(input);
                Ok(Reply::Validity(self.mnemonic.validate(&words)?))
            }
            Command::LastWord => {
                let words = normalize_words(input);
                let last = self.mnemonic.compute_last_word(&words)?;
                Ok(Reply::LastWord(Zeroizing::new(last.to_string())))
            }
            Command::Rebuild => {
                let words = normalize_words(input);
                let mnemonic = self.mnemonic.rebuild(&words)?;
                Ok(Reply::Mnemonic {
                    words: mnemonic.len(),
                    phrase: mnemonic.phrase(),
                })
            }
            Command::EncodeHex => {
                let words = normalize_words(input);
                Ok(Reply::Hex(self.hex.encode(&words)?))
            }
            Command::DecodeHex => {
                let mnemonic = self.hex.decode(input)?;
                Ok(Reply::Mnemonic {
                    words: mnemonic.len(),
                    phrase: mnemonic.phrase(),
                })
            }
            Command::Generate | Command::Quit => Err(CommandError::Interactive(command)),
        }
    }

    /// Encodes freshly collected entropy.
    pub fn encode_entropy(&self, entropy: &Entropy) -> Reply {
        let mnemonic = self.mnemonic.encode(entropy);
        Reply::Mnemonic {
            words: mnemonic.len(),
            phrase: mnemonic.phrase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_24() -> String {
        format!("{}art", "abandon ".repeat(23))
    }

    #[test]
    fn test_normalize_words() {
        let words = normalize_words("  Abandon,ABOUT   zoo\n");
        assert_eq!(words.as_slice(), &["abandon", "about", "zoo"]);
    }

    #[test]
    fn test_validate_reply() {
        let dict = Dictionary::english();
        let dispatcher = Dispatcher::new(&dict);
        let reply = dispatcher.execute(Command::Validate, &zero_24()).unwrap();
        assert!(matches!(reply, Reply::Validity(true)));
        assert_eq!(reply.payload(), "valid");

        let stale = format!("{}zoo", "abandon ".repeat(23));
        let reply = dispatcher.execute(Command::Validate, &stale).unwrap();
        assert!(matches!(reply, Reply::Validity(false)));
    }

    #[test]
    fn test_last_word_and_rebuild() {
        let dict = Dictionary::english();
        let dispatcher = Dispatcher::new(&dict);
        let prefix = "abandon ".repeat(23);

        let reply = dispatcher.execute(Command::LastWord, &prefix).unwrap();
        assert_eq!(reply.to_string(), "Last word: art");

        let reply = dispatcher.execute(Command::Rebuild, &prefix).unwrap();
        assert_eq!(reply.payload(), zero_24());
    }

    #[test]
    fn test_hex_commands() {
        let dict = Dictionary::english();
        let dispatcher = Dispatcher::new(&dict);

        let reply = dispatcher.execute(Command::EncodeHex, &zero_24()).unwrap();
        let hex = reply.payload().to_string();
        assert_eq!(hex.len(), 72);
        assert!(reply.to_string().starts_with("Hex (72 chars):\n"));

        let reply = dispatcher.execute(Command::DecodeHex, &hex).unwrap();
        assert_eq!(reply.payload(), zero_24());
    }

    #[test]
    fn test_errors_are_not_fatal() {
        let dict = Dictionary::english();
        let dispatcher = Dispatcher::new(&dict);

        let err = dispatcher
            .execute(Command::DecodeHex, &"0".repeat(71))
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Codec(CodecError::InvalidHexLength { len: 71 })
        ));
        assert!(!err.is_fatal());

        let err = dispatcher.execute(Command::Rebuild, "abandon").unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_generate_needs_session() {
        let dict = Dictionary::english();
        let dispatcher = Dispatcher::new(&dict);
        assert!(matches!(
            dispatcher.execute(Command::Generate, ""),
            Err(CommandError::Interactive(Command::Generate))
        ));
    }
}
