//! Ordered wordlist with reverse lookup.

use std::collections::HashMap;
use std::path::Path;

use bip39::Language;
use thiserror::Error;

/// Number of words in a BIP39 dictionary (one per 11-bit index).
pub const WORD_COUNT: usize = 2048;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Errors raised while loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read wordlist {path}: {reason}")]
    FileRead { path: String, reason: String },
    #[error("wordlist has {got} words, expected {WORD_COUNT}")]
    WrongLength { got: usize },
    #[error("blank line at line {line}")]
    BlankLine { line: usize },
    #[error("invalid word {word:?} at line {line}: words must be lowercase without whitespace")]
    InvalidWord { word: String, line: usize },
    #[error("duplicate word {word:?} at lines {first} and {second}")]
    Duplicate {
        word: String,
        first: usize,
        second: usize,
    },
}

/// Immutable ordered table of exactly [`WORD_COUNT`] unique words.
///
/// The position of a word is its index. Lookups in both directions are O(1).
#[derive(Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Dictionary {
    /// Builds a dictionary from an ordered word sequence.
    ///
    /// Line numbers in errors are 1-based positions in `words`.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORD_COUNT {
            return Err(DictionaryError::WrongLength { got: words.len() });
        }

        let mut index = HashMap::with_capacity(WORD_COUNT);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(DictionaryError::BlankLine { line: i + 1 });
            }
            if word.chars().any(|c| {
                c.is_whitespace() || c.is_uppercase() || c.is_control() || c == BYTE_ORDER_MARK
            }) {
                return Err(DictionaryError::InvalidWord {
                    word: word.clone(),
                    line: i + 1,
                });
            }
            // WORD_COUNT fits in 11 bits, so the cast is lossless.
            if let Some(first) = index.insert(word.clone(), i as u16) {
                return Err(DictionaryError::Duplicate {
                    word: word.clone(),
                    first: first as usize + 1,
                    second: i + 1,
                });
            }
        }

        tracing::debug!(words = words.len(), "Dictionary validated");
        Ok(Self { words, index })
    }

    /// Parses the plain-text wordlist format: one word per line.
    ///
    /// A leading UTF-8 byte order mark, a trailing newline and CRLF line
    /// endings are accepted. Blank lines anywhere else are an error.
    pub fn parse(text: &str) -> Result<Self, DictionaryError> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let words: Vec<&str> = text.lines().map(str::trim).collect();
        if let Some(pos) = words.iter().position(|word| word.is_empty()) {
            return Err(DictionaryError::BlankLine { line: pos + 1 });
        }
        Self::from_words(words)
    }

    /// Loads a wordlist file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DictionaryError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let dictionary = Self::parse(&text)?;
        tracing::info!(path = %path.display(), "Loaded wordlist");
        Ok(dictionary)
    }

    /// The standard BIP39 English wordlist.
    pub fn english() -> Self {
        let words = Language::English.word_list();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.to_string(), i as u16))
            .collect();
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            index,
        }
    }

    /// Returns the index of `word`, if present.
    #[inline]
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Returns the word at `index`, if in range.
    #[inline]
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// Returns true if `word` is in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of words (always [`WORD_COUNT`]).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl std::ops::Index<u16> for Dictionary {
    type Output = str;

    /// Panics if `index` is 2048 or above; use [`Dictionary::word`] for
    /// unchecked input.
    fn index(&self, index: u16) -> &str {
        &self.words[index as usize]
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("len", &self.words.len())
            .field("first", &self.words.first())
            .field("last", &self.words.last())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_words() -> Vec<String> {
        (0..WORD_COUNT).map(|i| format!("w{i:04}")).collect()
    }

    #[test]
    fn test_english_endpoints() {
        let dict = Dictionary::english();
        assert_eq!(dict.len(), WORD_COUNT);
        assert_eq!(dict.word(0), Some("abandon"));
        assert_eq!(dict.word(2047), Some("zoo"));
        assert_eq!(dict.index_of("about"), Some(3));
        assert_eq!(dict.word(2048), None);
        assert_eq!(dict.index_of("abandonn"), None);
    }

    #[test]
    fn test_from_words_accepts_valid_list() {
        let dict = Dictionary::from_words(synthetic_words()).unwrap();
        assert_eq!(dict.index_of("w0042"), Some(42));
        assert_eq!(dict.word(2047), Some("w2047"));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let mut words = synthetic_words();
        words.pop();
        assert!(matches!(
            Dictionary::from_words(words),
            Err(DictionaryError::WrongLength { got: 2047 })
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut words = synthetic_words();
        words[100] = "w0007".to_string();
        assert!(matches!(
            Dictionary::from_words(words),
            Err(DictionaryError::Duplicate { first: 8, second: 101, .. })
        ));
    }

    #[test]
    fn test_uppercase_rejected() {
        let mut words = synthetic_words();
        words[5] = "Upper".to_string();
        assert!(matches!(
            Dictionary::from_words(words),
            Err(DictionaryError::InvalidWord { line: 6, .. })
        ));
    }

    #[test]
    fn test_parse_tolerates_crlf_and_trailing_newline() {
        let text = synthetic_words().join("\r\n") + "\r\n";
        let dict = Dictionary::parse(&text).unwrap();
        assert_eq!(dict.index_of("w0000"), Some(0));
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let text = format!("\u{feff}{}\n", synthetic_words().join("\n"));
        let dict = Dictionary::parse(&text).unwrap();
        assert_eq!(dict.index_of("w0000"), Some(0));
        assert_eq!(dict.word(0), Some("w0000"));
    }

    #[test]
    fn test_stray_byte_order_mark_rejected() {
        let mut words = synthetic_words();
        words[3] = "\u{feff}w0003".to_string();
        assert!(matches!(
            Dictionary::from_words(words),
            Err(DictionaryError::InvalidWord { line: 4, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_interior_blank_line() {
        let mut words = synthetic_words();
        words.insert(10, String::new());
        let text = words.join("\n");
        assert!(matches!(
            Dictionary::parse(&text),
            Err(DictionaryError::BlankLine { line: 11 })
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Dictionary::from_file("/nonexistent/english.txt").unwrap_err();
        assert!(matches!(err, DictionaryError::FileRead { .. }));
        assert!(err.to_string().contains("/nonexistent/english.txt"));
    }
}
