//! Statistical sanity checks on byte output.
//!
//! Used fail-closed on secure-source draws, and to measure the uniformity
//! of dice extraction. These are sanity checks, not cryptographic proofs
//! of entropy.

mod statistics;
mod threshold;

pub use statistics::StatisticalTests;
pub use threshold::{QualityThresholds, ThresholdViolation};
