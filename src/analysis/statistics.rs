//! Statistical tests for byte output.
//!
//! These are sanity checks to detect obvious problems, not proofs of
//! entropy quality. Passing them is necessary but not sufficient.

/// Statistical test results for a byte sample.
#[derive(Debug, Clone)]
pub struct StatisticalTests {
    /// Bit bias (fraction of ones minus 0.5).
    pub bit_bias: f64,
    /// Pearson chi-square statistic over the 256 byte values.
    pub chi_square: f64,
    /// Longest run of one repeated byte value.
    pub longest_run: usize,
    /// Number of bytes analyzed.
    pub sample_size: usize,
}

impl StatisticalTests {
    /// Runs all statistical tests on `data`.
    pub fn analyze(data: &[u8]) -> Self {
        Self {
            bit_bias: Self::compute_bit_bias(data),
            chi_square: Self::compute_chi_square(data),
            longest_run: Self::compute_longest_run(data),
            sample_size: data.len(),
        }
    }

    /// Computes bit bias as deviation from 0.5.
    ///
    /// Returns a value in [-0.5, 0.5] where 0.0 is unbiased.
    fn compute_bit_bias(data: &[u8]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let ones: usize = data.iter().map(|b| b.count_ones() as usize).sum();
        (ones as f64 / (data.len() * 8) as f64) - 0.5
    }

    /// Computes the chi-square statistic against a uniform distribution.
    ///
    /// With 255 degrees of freedom the expected value is about 255 for
    /// uniform data; a biased source drives it well above that.
    fn compute_chi_square(data: &[u8]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        let expected = data.len() as f64 / 256.0;
        counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    fn compute_longest_run(data: &[u8]) -> usize {
        let mut longest = 0;
        let mut current = 0;
        let mut previous = None;
        for &byte in data {
            if previous == Some(byte) {
                current += 1;
            } else {
                current = 1;
                previous = Some(byte);
            }
            longest = longest.max(current);
        }
        longest
    }
}
