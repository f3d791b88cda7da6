//! Unbiased byte extraction from dice rolls.
//!
//! A die gives one base-6 digit per roll. Four rolls span 6^4 = 1296
//! outcomes, the smallest power of six covering a byte. Reducing 1296
//! outcomes mod 256 would favour 0..=15, so batches whose value lands in
//! the top 1296 - 1280 = 16 outcomes are thrown away whole and replaced by
//! fresh rolls. The accepted range 0..1280 maps exactly five values onto
//! every byte.
//!
//! The extractor never waits for input. Each [`DiceExtractor::feed`] call
//! reports how many rolls are still needed so the caller can prompt again.

use zeroize::{Zeroize, Zeroizing};

use super::{Entropy, EntropyError};
use crate::codec::WordCount;

const fn batch_shape() -> (usize, u32) {
    let mut rolls = 0;
    let mut space = 1u32;
    while space < 256 {
        space *= 6;
        rolls += 1;
    }
    (rolls, space)
}

const BATCH: (usize, u32) = batch_shape();

/// Rolls combined into one candidate byte.
pub const ROLLS_PER_BATCH: usize = BATCH.0;

/// Outcomes of one batch (6^ROLLS_PER_BATCH).
const BATCH_SPACE: u32 = BATCH.1;

/// Batch values at or above this are rejected.
const ACCEPT_LIMIT: u32 = BATCH_SPACE - BATCH_SPACE % 256;

/// Where an extraction stands after a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceProgress {
    /// More rolls are required.
    NeedMoreRolls {
        /// Minimum rolls still needed, assuming no further rejections.
        rolls_needed: usize,
        /// Batches discarded so far.
        rejected_batches: usize,
    },
    /// The target byte count has been reached.
    Ready,
}

/// Parses rolls typed as digits, e.g. `"3 1 6 6"` or `"3166"`.
///
/// Whitespace and commas separate nothing and are skipped. Any other
/// character outside `1..=6` is reported with its character offset in
/// `input`.
pub fn parse_rolls(input: &str) -> Result<Vec<u8>, EntropyError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace() && *c != ',')
        .map(|(position, c)| match c {
            '1'..='6' => Ok(c as u8 - b'0'),
            _ => Err(EntropyError::InvalidRoll { found: c, position }),
        })
        .collect()
}

/// Rejection-sampling accumulator for dice entropy.
///
/// State lives for one generation; dropping the extractor wipes the
/// partial bytes and the half-finished batch.
pub struct DiceExtractor {
    target: usize,
    bytes: Vec<u8>,
    pending_value: u32,
    pending_rolls: usize,
    rejected_batches: usize,
    rolls_consumed: usize,
}

impl DiceExtractor {
    /// Creates an extractor producing `target_bytes` bytes.
    pub fn new(target_bytes: usize) -> Self {
        Self {
            target: target_bytes,
            bytes: Vec::with_capacity(target_bytes),
            pending_value: 0,
            pending_rolls: 0,
            rejected_batches: 0,
            rolls_consumed: 0,
        }
    }

    /// Creates an extractor for a `word_count` mnemonic.
    pub fn for_word_count(word_count: WordCount) -> Self {
        Self::new(word_count.entropy_bytes())
    }

    /// Consumes rolls (values 1..=6).
    ///
    /// The whole slice is checked before any roll is used, so an invalid
    /// value leaves the extractor unchanged. Rolls beyond the target are
    /// ignored.
    pub fn feed(&mut self, rolls: &[u8]) -> Result<DiceProgress, EntropyError> {
        if let Some(index) = rolls.iter().position(|r| !(1..=6).contains(r)) {
            return Err(EntropyError::RollOutOfRange {
                value: rolls[index],
                index,
            });
        }

        let mut ignored = 0;
        for &roll in rolls {
            if self.is_complete() {
                ignored += 1;
            } else {
                self.push_roll(roll);
            }
        }
        if ignored > 0 {
            tracing::debug!(ignored, "Surplus dice rolls ignored");
        }

        Ok(self.progress())
    }

    fn push_roll(&mut self, roll: u8) {
        self.pending_value = self.pending_value * 6 + u32::from(roll - 1);
        self.pending_rolls += 1;
        self.rolls_consumed += 1;

        if self.pending_rolls < ROLLS_PER_BATCH {
            return;
        }

        let value = self.pending_value;
        self.pending_value = 0;
        self.pending_rolls = 0;

        if value >= ACCEPT_LIMIT {
            self.rejected_batches += 1;
            tracing::debug!(
                rejected_batches = self.rejected_batches,
                "Dice batch in rejection zone, discarded"
            );
        } else {
            self.bytes.push((value % 256) as u8);
        }
    }

    /// Current progress.
    pub fn progress(&self) -> DiceProgress {
        if self.is_complete() {
            DiceProgress::Ready
        } else {
            DiceProgress::NeedMoreRolls {
                rolls_needed: self.rolls_needed(),
                rejected_batches: self.rejected_batches,
            }
        }
    }

    /// Minimum rolls still needed, assuming no further rejections.
    pub fn rolls_needed(&self) -> usize {
        (self.target - self.bytes.len()) * ROLLS_PER_BATCH - self.pending_rolls
    }

    /// True once the target byte count is reached.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.bytes.len() >= self.target
    }

    /// Bytes extracted so far.
    #[inline]
    pub fn bytes_extracted(&self) -> usize {
        self.bytes.len()
    }

    /// Batches discarded so far.
    #[inline]
    pub fn rejected_batches(&self) -> usize {
        self.rejected_batches
    }

    /// Rolls used so far, including those in rejected batches.
    #[inline]
    pub fn rolls_consumed(&self) -> usize {
        self.rolls_consumed
    }

    /// Returns the extracted bytes once complete.
    pub fn into_bytes(mut self) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
        if !self.is_complete() {
            return Err(EntropyError::Incomplete {
                rolls_needed: self.rolls_needed(),
            });
        }
        Ok(Zeroizing::new(std::mem::take(&mut self.bytes)))
    }

    /// Returns the extracted bytes as mnemonic entropy once complete.
    pub fn into_entropy(self) -> Result<Entropy, EntropyError> {
        let bytes = self.into_bytes()?;
        Entropy::from_slice(&bytes)
    }
}

impl Drop for DiceExtractor {
    fn drop(&mut self) {
        self.bytes.zeroize();
        self.pending_value.zeroize();
    }
}

impl std::fmt::Debug for DiceExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceExtractor")
            .field("target", &self.target)
            .field("extracted", &self.bytes.len())
            .field("pending_rolls", &self.pending_rolls)
            .field("rejected_batches", &self.rejected_batches)
            .finish_non_exhaustive()
    }
}
