//! Entropy to word-sequence transform with SHA-256 checksum.
//!
//! The encoded bitstream is `entropy || checksum`, where the checksum is the
//! first `entropy_bits / 32` bits of `SHA-256(entropy)`. The stream is cut into
//! 11-bit big-endian groups and each group selects one dictionary word.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use super::bits::{BitReader, BitWriter};
use super::error::CodecError;
use super::word_count::{WordCount, BITS_PER_WORD};
use crate::dictionary::Dictionary;
use crate::entropy::Entropy;

/// Word counts accepted by [`MnemonicCodec::decode`].
const ANY_LENGTH: &str = "12, 15, 18, 21 or 24";

/// An ordered sequence of dictionary indices bound to its dictionary.
///
/// Indices are always below 2048. Sequences produced by the mnemonic codec
/// have a BIP39 length; sequences decoded from compact hex may not, since
/// that format packs indices without interpreting them.
#[derive(Clone)]
pub struct Mnemonic<'d> {
    dictionary: &'d Dictionary,
    indices: Vec<u16>,
}

impl<'d> Mnemonic<'d> {
    pub(crate) fn from_indices(dictionary: &'d Dictionary, indices: Vec<u16>) -> Self {
        debug_assert!(indices.iter().all(|&i| dictionary.word(i).is_some()));
        Self {
            dictionary,
            indices,
        }
    }

    /// Returns the dictionary indices.
    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Iterates over the words in order.
    pub fn words(&self) -> impl Iterator<Item = &'d str> + '_ {
        let dictionary = self.dictionary;
        self.indices.iter().map(move |&i| &dictionary[i])
    }

    /// Number of words.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if the sequence holds no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The BIP39 length of this sequence, if it has one.
    pub fn word_count(&self) -> Option<WordCount> {
        WordCount::from_words(self.indices.len())
    }

    /// Space-separated phrase. The returned buffer is wiped on drop.
    pub fn phrase(&self) -> Zeroizing<String> {
        let mut phrase = Zeroizing::new(String::new());
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                phrase.push(' ');
            }
            phrase.push_str(word);
        }
        phrase
    }
}

impl Drop for Mnemonic<'_> {
    fn drop(&mut self) {
        self.indices.zeroize();
    }
}

impl std::fmt::Display for Mnemonic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.phrase())
    }
}

impl std::fmt::Debug for Mnemonic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.indices.len())
            .finish_non_exhaustive()
    }
}

/// Result of decoding a word sequence.
#[derive(Debug)]
pub struct Decoded {
    entropy: Entropy,
    checksum_valid: bool,
}

impl Decoded {
    /// The entropy bits carried by the words.
    pub fn entropy(&self) -> &Entropy {
        &self.entropy
    }

    /// Whether the trailing checksum bits match the entropy.
    pub fn checksum_valid(&self) -> bool {
        self.checksum_valid
    }

    /// Consumes the result, returning the entropy.
    pub fn into_entropy(self) -> Entropy {
        self.entropy
    }
}

/// Leading `bits` bits (at most 8) of `SHA-256(entropy)`.
fn checksum(entropy: &[u8], bits: usize) -> u16 {
    debug_assert!((1..=8).contains(&bits));
    let digest = Sha256::digest(entropy);
    u16::from(digest[0] >> (8 - bits))
}

/// Bidirectional entropy/mnemonic codec over a shared dictionary.
#[derive(Debug, Clone, Copy)]
pub struct MnemonicCodec<'d> {
    dictionary: &'d Dictionary,
}

impl<'d> MnemonicCodec<'d> {
    /// Creates a codec backed by `dictionary`.
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self { dictionary }
    }

    /// Returns the backing dictionary.
    pub fn dictionary(&self) -> &'d Dictionary {
        self.dictionary
    }

    /// Encodes entropy as a checksummed word sequence.
    pub fn encode(&self, entropy: &Entropy) -> Mnemonic<'d> {
        let word_count = entropy.word_count();
        let cs_bits = word_count.checksum_bits();

        let mut writer = BitWriter::with_capacity(word_count.total_bits());
        writer.push_bytes(entropy.as_bytes());
        writer.push(u32::from(checksum(entropy.as_bytes(), cs_bits)), cs_bits);
        debug_assert_eq!(writer.bit_len(), word_count.total_bits());

        let mut reader = BitReader::new(writer.as_bytes());
        // 11-bit reads cannot exceed 0x7FF.
        let indices: Vec<u16> = std::iter::from_fn(|| reader.read(BITS_PER_WORD))
            .take(word_count.words())
            .map(|group| group as u16)
            .collect();

        tracing::debug!(words = indices.len(), "Encoded entropy");
        Mnemonic::from_indices(self.dictionary, indices)
    }

    /// Decodes words back to entropy and checks the checksum.
    ///
    /// A checksum mismatch is reported through [`Decoded::checksum_valid`],
    /// not as an error.
    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> Result<Decoded, CodecError> {
        let word_count =
            WordCount::from_words(words.len()).ok_or_else(|| CodecError::InvalidWordCount {
                got: words.len(),
                expected: ANY_LENGTH.to_string(),
            })?;
        let indices = self.lookup(words)?;

        let mut writer = BitWriter::with_capacity(word_count.total_bits());
        for &index in indices.iter() {
            writer.push(u32::from(index), BITS_PER_WORD);
        }

        let cs_bits = word_count.checksum_bits();
        let entropy_bytes = &writer.as_bytes()[..word_count.entropy_bytes()];
        // The checksum occupies the low bits of the final word.
        let stored = indices[indices.len() - 1] & ((1u16 << cs_bits) - 1);
        let checksum_valid = stored == checksum(entropy_bytes, cs_bits);

        let entropy = Entropy::with_word_count(entropy_bytes.to_vec(), word_count);

        tracing::debug!(words = words.len(), checksum_valid, "Decoded mnemonic");
        Ok(Decoded {
            entropy,
            checksum_valid,
        })
    }

    /// Returns true if `words` carry a correct checksum.
    ///
    /// Unknown words and bad lengths are still errors.
    pub fn validate<S: AsRef<str>>(&self, words: &[S]) -> Result<bool, CodecError> {
        self.decode(words).map(|decoded| decoded.checksum_valid())
    }

    /// Computes the 24th word for 23 known words.
    ///
    /// The 23 words fix 253 of the 256 entropy bits. The remaining 3 bits
    /// are set to zero and the 8-bit checksum is computed over the result,
    /// so the same prefix always yields the same word.
    pub fn compute_last_word<S: AsRef<str>>(&self, first_23: &[S]) -> Result<&'d str, CodecError> {
        self.compute_last_word_for(WordCount::TwentyFour, first_23)
    }

    /// Computes the final word of a `word_count` mnemonic from its prefix.
    ///
    /// Uses the same zero-fill rule as [`compute_last_word`]: the final word
    /// carries `11 - checksum_bits` zero entropy bits followed by the checksum.
    ///
    /// [`compute_last_word`]: MnemonicCodec::compute_last_word
    pub fn compute_last_word_for<S: AsRef<str>>(
        &self,
        word_count: WordCount,
        prefix: &[S],
    ) -> Result<&'d str, CodecError> {
        if prefix.len() + 1 != word_count.words() {
            return Err(CodecError::InvalidWordCount {
                got: prefix.len(),
                expected: (word_count.words() - 1).to_string(),
            });
        }
        let indices = self.lookup(prefix)?;
        let last = self.last_index(word_count, &indices);
        Ok(&self.dictionary[last])
    }

    /// Completes or repairs a 24-word mnemonic.
    ///
    /// With 23 tokens the computed last word is appended. With 24 the
    /// supplied last word is discarded and recomputed.
    pub fn rebuild<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Mnemonic<'d>, CodecError> {
        let word_count = WordCount::TwentyFour;
        let prefix = match tokens.len() {
            23 => tokens,
            24 => &tokens[..23],
            got => {
                return Err(CodecError::InvalidWordCount {
                    got,
                    expected: "23 or 24".to_string(),
                })
            }
        };

        let mut indices = self.lookup(prefix)?;
        let last = self.last_index(word_count, &indices);
        indices.push(last);

        tracing::debug!(supplied = tokens.len(), "Rebuilt mnemonic");
        Ok(Mnemonic::from_indices(self.dictionary, indices.to_vec()))
    }

    fn last_index(&self, word_count: WordCount, prefix: &[u16]) -> u16 {
        let cs_bits = word_count.checksum_bits();
        let fill_bits = BITS_PER_WORD - cs_bits;

        let mut writer = BitWriter::with_capacity(word_count.entropy_bits());
        for &index in prefix {
            writer.push(u32::from(index), BITS_PER_WORD);
        }
        writer.push(0, fill_bits);
        debug_assert_eq!(writer.bit_len(), word_count.entropy_bits());

        // Zero fill bits above the checksum.
        checksum(writer.as_bytes(), cs_bits)
    }

    /// Resolves words to indices, reporting the first unknown word.
    fn lookup<S: AsRef<str>>(&self, words: &[S]) -> Result<Zeroizing<Vec<u16>>, CodecError> {
        let mut indices = Zeroizing::new(Vec::with_capacity(words.len() + 1));
        for (position, word) in words.iter().enumerate() {
            let word = word.as_ref();
            match self.dictionary.index_of(word) {
                Some(index) => indices.push(index),
                None => {
                    return Err(CodecError::UnknownWord {
                        word: word.to_string(),
                        position,
                    })
                }
            }
        }
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ErrorKind;

    fn phrase_words(phrase: &str) -> Vec<&str> {
        phrase.split_whitespace().collect()
    }

    fn encode_hex_entropy(dict: &Dictionary, hex_entropy: &str) -> String {
        let entropy = Entropy::new(hex::decode(hex_entropy).unwrap()).unwrap();
        MnemonicCodec::new(dict).encode(&entropy).to_string()
    }

    #[test]
    fn test_zero_entropy_vectors() {
        let dict = Dictionary::english();

        let twelve = encode_hex_entropy(&dict, &"00".repeat(16));
        assert_eq!(twelve, format!("{}about", "abandon ".repeat(11)));

        let eighteen = encode_hex_entropy(&dict, &"00".repeat(24));
        assert_eq!(eighteen, format!("{}agent", "abandon ".repeat(17)));

        let twenty_four = encode_hex_entropy(&dict, &"00".repeat(32));
        assert_eq!(twenty_four, format!("{}art", "abandon ".repeat(23)));
    }

    #[test]
    fn test_reference_vectors() {
        let dict = Dictionary::english();
        let vectors = [
            (
                "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
            ),
            (
                "80808080808080808080808080808080",
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
            ),
            (
                "ffffffffffffffffffffffffffffffff",
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            ),
            (
                "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo \
                 zoo zoo zoo zoo zoo zoo zoo vote",
            ),
        ];
        for (entropy, phrase) in vectors {
            assert_eq!(encode_hex_entropy(&dict, entropy), phrase);
        }
    }

    #[test]
    fn test_decode_recovers_entropy() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let words = phrase_words(
            "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
        );

        let decoded = codec.decode(&words).unwrap();
        assert!(decoded.checksum_valid());
        assert_eq!(decoded.entropy().as_bytes(), &[0x80u8; 16]);
    }

    #[test]
    fn test_wrong_checksum_is_flag_not_error() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let words = vec!["abandon"; 12];

        let decoded = codec.decode(&words).unwrap();
        assert!(!decoded.checksum_valid());
        assert_eq!(decoded.entropy().as_bytes(), &[0u8; 16]);
        assert_eq!(codec.validate(&words), Ok(false));
    }

    #[test]
    fn test_unknown_word_reports_position() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let mut words = vec!["abandon"; 24];
        words[23] = "art";
        words[13] = "abandonn";

        let err = codec.decode(&words).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownWord {
                word: "abandonn".to_string(),
                position: 13
            }
        );
        assert_eq!(err.kind(), ErrorKind::UnknownWord);
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let err = codec.decode(&vec!["abandon"; 13]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidWordCount { got: 13, .. }));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_last_word_zero_fill() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        // 253 zero bits plus 3 zero fill bits is all-zero entropy.
        let last = codec.compute_last_word(&vec!["abandon"; 23]).unwrap();
        assert_eq!(last, "art");
    }

    #[test]
    fn test_last_word_is_deterministic() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let prefix = vec!["zoo"; 23];
        let first = codec.compute_last_word(&prefix).unwrap();
        let second = codec.compute_last_word(&prefix).unwrap();
        assert_eq!(first, second);
        // Top three bits of the final index are the zero fill.
        assert!(dict.index_of(first).unwrap() < 256);
    }

    #[test]
    fn test_last_word_requires_23_words() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        assert!(matches!(
            codec.compute_last_word(&vec!["abandon"; 22]),
            Err(CodecError::InvalidWordCount { got: 22, .. })
        ));
    }

    #[test]
    fn test_last_word_for_twelve() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let last = codec
            .compute_last_word_for(WordCount::Twelve, &vec!["abandon"; 11])
            .unwrap();
        assert_eq!(last, "about");
    }

    #[test]
    fn test_rebuild_replaces_stale_last_word() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let mut tokens = vec!["abandon"; 24];
        tokens[23] = "zoo";

        let rebuilt = codec.rebuild(&tokens).unwrap();
        assert_eq!(rebuilt.len(), 24);
        assert_eq!(rebuilt.words().last(), Some("art"));

        let words: Vec<&str> = rebuilt.words().collect();
        assert_eq!(codec.validate(&words), Ok(true));
    }

    #[test]
    fn test_rebuild_ignores_unknown_discarded_word() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        let mut tokens = vec!["abandon"; 24];
        tokens[23] = "notaword";
        assert!(codec.rebuild(&tokens).is_ok());
    }

    #[test]
    fn test_rebuild_rejects_other_counts() {
        let dict = Dictionary::english();
        let codec = MnemonicCodec::new(&dict);
        for count in [0, 12, 22, 25] {
            assert!(matches!(
                codec.rebuild(&vec!["abandon"; count]),
                Err(CodecError::InvalidWordCount { .. })
            ));
        }
    }

    #[test]
    fn test_mnemonic_debug_hides_words() {
        let dict = Dictionary::english();
        let entropy = Entropy::new(vec![0u8; 16]).unwrap();
        let mnemonic = MnemonicCodec::new(&dict).encode(&entropy);
        assert!(!format!("{mnemonic:?}").contains("abandon"));
    }
}
