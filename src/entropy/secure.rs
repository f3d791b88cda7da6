//! Secure random entropy.

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::{Entropy, EntropyError};
use crate::analysis::{QualityThresholds, StatisticalTests};
use crate::codec::WordCount;

/// Draws entropy for a `word_count` mnemonic from a secure generator.
///
/// The binary passes `rand_core::OsRng`. A generator error, or output that
/// fails `thresholds`, is reported as [`EntropyError::SourceUnavailable`]:
/// a source producing obviously broken output is not trusted for keys.
pub fn generate_secure<R>(
    rng: &mut R,
    word_count: WordCount,
    thresholds: &QualityThresholds,
) -> Result<Entropy, EntropyError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut bytes = vec![0u8; word_count.entropy_bytes()];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| EntropyError::SourceUnavailable(e.to_string()))?;

    let stats = StatisticalTests::analyze(&bytes);
    if let Err(violation) = thresholds.check(&stats) {
        bytes.zeroize();
        tracing::warn!(%violation, "Secure source output rejected");
        return Err(EntropyError::SourceUnavailable(format!(
            "output failed sanity check: {violation}"
        )));
    }

    tracing::debug!(bytes = bytes.len(), "Generated secure entropy");
    Ok(Entropy::with_word_count(bytes, word_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::{impls, Error, SeedableRng};

    /// Generator that always fails, standing in for a missing OS source.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), Error> {
            Err(Error::new("device unavailable"))
        }
    }

    impl CryptoRng for BrokenRng {}

    /// Generator stuck on zero output.
    struct StuckRng;

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            impls::fill_bytes_via_next(self, dest);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for StuckRng {}

    #[test]
    fn test_generates_requested_length() {
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(7);
        for word_count in WordCount::ALL {
            let entropy =
                generate_secure(&mut rng, word_count, &QualityThresholds::default()).unwrap();
            assert_eq!(entropy.len(), word_count.entropy_bytes());
            assert_eq!(entropy.word_count(), word_count);
        }
    }

    #[test]
    fn test_successive_draws_differ() {
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(7);
        let thresholds = QualityThresholds::default();
        let a = generate_secure(&mut rng, WordCount::TwentyFour, &thresholds).unwrap();
        let b = generate_secure(&mut rng, WordCount::TwentyFour, &thresholds).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_source_failure_is_fatal() {
        let err = generate_secure(&mut BrokenRng, WordCount::Twelve, &QualityThresholds::default())
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_stuck_source_rejected() {
        let err = generate_secure(&mut StuckRng, WordCount::TwentyFour, &QualityThresholds::default())
            .unwrap_err();
        assert!(matches!(err, EntropyError::SourceUnavailable(_)));
    }
}
