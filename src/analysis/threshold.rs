//! Quality thresholds for fail-closed behavior.
//!
//! Output that violates a threshold is rejected rather than turned into a
//! mnemonic.

use super::statistics::StatisticalTests;
use serde::{Deserialize, Serialize};

/// Quality thresholds for byte output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Maximum acceptable bit bias (absolute value).
    pub max_bit_bias: f64,
    /// Maximum acceptable run of one repeated byte value.
    pub max_repeat_run: usize,
    /// Maximum acceptable chi-square statistic, if checked.
    ///
    /// Only meaningful for samples of a few thousand bytes or more.
    pub max_chi_square: Option<f64>,
}

impl Default for QualityThresholds {
    /// Thresholds for a single 16-32 byte entropy draw.
    fn default() -> Self {
        Self {
            max_bit_bias: 0.35, // ~8 sigma for 128 bits
            max_repeat_run: 8,
            max_chi_square: None,
        }
    }
}

impl QualityThresholds {
    /// Thresholds for large samples (tens of thousands of bytes).
    ///
    /// 350 is roughly four standard deviations above the chi-square mean
    /// for 255 degrees of freedom.
    pub fn bulk() -> Self {
        Self {
            max_bit_bias: 0.01,
            max_repeat_run: 8,
            max_chi_square: Some(350.0),
        }
    }

    /// Checks statistics against thresholds.
    pub fn check(&self, stats: &StatisticalTests) -> Result<(), ThresholdViolation> {
        if stats.bit_bias.abs() > self.max_bit_bias {
            return Err(ThresholdViolation::BitBias {
                observed: stats.bit_bias,
                threshold: self.max_bit_bias,
            });
        }

        if stats.longest_run > self.max_repeat_run {
            return Err(ThresholdViolation::RepeatedBytes {
                observed: stats.longest_run,
                threshold: self.max_repeat_run,
            });
        }

        if let Some(max) = self.max_chi_square {
            if stats.chi_square > max {
                return Err(ThresholdViolation::NonUniform {
                    observed: stats.chi_square,
                    threshold: max,
                });
            }
        }

        Ok(())
    }
}

/// Threshold violation types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdViolation {
    #[error("bit bias {observed:.4} exceeds threshold {threshold:.4}")]
    BitBias { observed: f64, threshold: f64 },

    #[error("run of {observed} repeated bytes exceeds threshold {threshold}")]
    RepeatedBytes { observed: usize, threshold: usize },

    #[error("chi-square {observed:.1} exceeds threshold {threshold:.1}")]
    NonUniform { observed: f64, threshold: f64 },
}
