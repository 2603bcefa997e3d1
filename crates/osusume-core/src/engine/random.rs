//! # Random Sources
//!
//! Sampling randomness is injected so tests can fix the seed while
//! production draws a fresh one per request.

use std::time::{SystemTime, UNIX_EPOCH};

use oorandom::Rand64;

/// Source of uniform random indices.
pub trait RandomSource {
    /// Returns a uniform value in `0..upper`. `upper` must be non-zero.
    fn next_below(&mut self, upper: usize) -> usize;
}

/// `oorandom`-backed random source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Rand64,
}

impl SeededRandom {
    /// Deterministic source: the same seed always yields the same sequence.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Rand64::new(u128::from(seed)),
        }
    }

    /// Source seeded from OS entropy, falling back to the clock.
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; 16];
        if getrandom::fill(&mut seed).is_err() {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            seed = nanos.to_le_bytes();
        }
        Self {
            rng: Rand64::new(u128::from_le_bytes(seed)),
        }
    }

    /// Fixed-seed source when `seed` is set, entropy-seeded otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRandom {
    fn next_below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0, "next_below requires a non-zero bound");
        self.rng.rand_range(0..upper as u64) as usize
    }
}

/// Picks `k` distinct positions out of `0..n`, returned in ascending order.
///
/// Uses a partial Fisher–Yates shuffle, so every subset of size `k` is
/// equally likely. When `k >= n` all positions are returned.
pub fn sample_positions<R: RandomSource + ?Sized>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..n).collect();
    if k >= n {
        return positions;
    }
    for i in 0..k {
        let j = i + rng.next_below(n - i);
        positions.swap(i, j);
    }
    positions.truncate(k);
    positions.sort_unstable();
    positions
}
