//! Allowed mnemonic lengths and their bit layout.

use serde::{Deserialize, Serialize};

/// Bits carried by one word.
pub const BITS_PER_WORD: usize = 11;

/// A mnemonic length permitted by BIP39.
///
/// Each variant fixes the entropy size and the checksum width:
/// `words * 11 == entropy_bits + entropy_bits / 32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum WordCount {
    /// 128-bit entropy, 4 checksum bits.
    Twelve,
    /// 160-bit entropy, 5 checksum bits.
    Fifteen,
    /// 192-bit entropy, 6 checksum bits.
    Eighteen,
    /// 224-bit entropy, 7 checksum bits.
    TwentyOne,
    /// 256-bit entropy, 8 checksum bits.
    TwentyFour,
}

impl WordCount {
    /// Every allowed length, shortest first.
    pub const ALL: [WordCount; 5] = [
        WordCount::Twelve,
        WordCount::Fifteen,
        WordCount::Eighteen,
        WordCount::TwentyOne,
        WordCount::TwentyFour,
    ];

    /// Looks up the variant for a word count.
    pub const fn from_words(words: usize) -> Option<Self> {
        match words {
            12 => Some(WordCount::Twelve),
            15 => Some(WordCount::Fifteen),
            18 => Some(WordCount::Eighteen),
            21 => Some(WordCount::TwentyOne),
            24 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }

    /// Looks up the variant for an entropy length in bytes.
    pub const fn from_entropy_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            16 => Some(WordCount::Twelve),
            20 => Some(WordCount::Fifteen),
            24 => Some(WordCount::Eighteen),
            28 => Some(WordCount::TwentyOne),
            32 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }

    /// Number of words.
    #[inline]
    pub const fn words(self) -> usize {
        match self {
            WordCount::Twelve => 12,
            WordCount::Fifteen => 15,
            WordCount::Eighteen => 18,
            WordCount::TwentyOne => 21,
            WordCount::TwentyFour => 24,
        }
    }

    /// Entropy length in bytes.
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    /// Entropy length in bits.
    #[inline]
    pub const fn entropy_bits(self) -> usize {
        self.total_bits() * 32 / 33
    }

    /// Checksum length in bits.
    #[inline]
    pub const fn checksum_bits(self) -> usize {
        self.entropy_bits() / 32
    }

    /// Total encoded bits (entropy plus checksum).
    #[inline]
    pub const fn total_bits(self) -> usize {
        self.words() * BITS_PER_WORD
    }
}

impl TryFrom<usize> for WordCount {
    type Error = String;

    fn try_from(words: usize) -> Result<Self, Self::Error> {
        WordCount::from_words(words)
            .ok_or_else(|| format!("invalid word count {words}: expected 12, 15, 18, 21 or 24"))
    }
}

impl From<WordCount> for usize {
    fn from(count: WordCount) -> usize {
        count.words()
    }
}

impl std::fmt::Display for WordCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words())
    }
}

impl std::str::FromStr for WordCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid word count {s:?}"))?;
        WordCount::try_from(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_table() {
        let table: Vec<_> = WordCount::ALL
            .iter()
            .map(|wc| (wc.words(), wc.entropy_bytes(), wc.checksum_bits()))
            .collect();
        assert_eq!(
            table,
            vec![(12, 16, 4), (15, 20, 5), (18, 24, 6), (21, 28, 7), (24, 32, 8)]
        );
    }

    #[test]
    fn test_bits_add_up() {
        for wc in WordCount::ALL {
            assert_eq!(wc.total_bits(), wc.entropy_bits() + wc.checksum_bits());
            assert_eq!(WordCount::from_entropy_bytes(wc.entropy_bytes()), Some(wc));
            assert_eq!(WordCount::from_words(wc.words()), Some(wc));
        }
    }

    #[test]
    fn test_rejects_other_lengths() {
        assert_eq!(WordCount::from_words(13), None);
        assert_eq!(WordCount::from_entropy_bytes(17), None);
        assert!("23".parse::<WordCount>().is_err());
        assert_eq!("18".parse::<WordCount>(), Ok(WordCount::Eighteen));
    }
}
