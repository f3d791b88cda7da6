//! Bulk statistics for the dice extractor.
//!
//! A simulated fair die feeds the extractor; the resulting bytes must look
//! uniform, while a plain modulo reduction of the same rolls must not.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use mnemonic_codec::entropy::ROLLS_PER_BATCH;
use mnemonic_codec::{DiceExtractor, QualityThresholds, StatisticalTests};

const SAMPLE_BYTES: usize = 128_000;

fn fair_roll(rng: &mut ChaCha20Rng) -> u8 {
    // 4_294_967_292 is the largest multiple of 6 below 2^32
    loop {
        let v = rng.next_u32();
        if v < 4_294_967_292 {
            return (v % 6) as u8 + 1;
        }
    }
}

#[test]
fn rejection_sampled_bytes_are_uniform() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xd1ce);
    let mut extractor = DiceExtractor::new(SAMPLE_BYTES);

    let mut rolls = Vec::with_capacity(4096);
    while !extractor.is_complete() {
        rolls.clear();
        rolls.extend((0..4096).map(|_| fair_roll(&mut rng)));
        extractor.feed(&rolls).unwrap();
    }

    // Rejection rate is 16/1296 per batch
    let batches = extractor.rolls_consumed() / ROLLS_PER_BATCH;
    let rejected = extractor.rejected_batches();
    assert_eq!(batches, SAMPLE_BYTES + rejected);
    let rate = rejected as f64 / batches as f64;
    assert!((rate - 16.0 / 1296.0).abs() < 0.003, "rejection rate {rate}");

    let bytes = extractor.into_bytes().unwrap();
    let stats = StatisticalTests::analyze(&bytes);
    QualityThresholds::bulk()
        .check(&stats)
        .unwrap_or_else(|v| panic!("dice output failed bulk checks: {v}"));
}

#[test]
fn naive_modulo_reduction_is_detectably_biased() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xd1ce);
    let bytes: Vec<u8> = (0..SAMPLE_BYTES)
        .map(|_| {
            let value = (0..ROLLS_PER_BATCH)
                .fold(0u32, |acc, _| acc * 6 + u32::from(fair_roll(&mut rng) - 1));
            (value % 256) as u8
        })
        .collect();

    let stats = StatisticalTests::analyze(&bytes);
    assert!(
        QualityThresholds::bulk().check(&stats).is_err(),
        "chi-square {} should exceed the bulk limit",
        stats.chi_square
    );
}
