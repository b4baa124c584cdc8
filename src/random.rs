//! Random sources for frugal estimators
//!
//! Every estimator owns its generator exclusively: sharing one generator
//! across ensemble members would correlate their adjustment decisions and
//! defeat the variance reduction that ensembling buys.
//!
//! The [`RandomSource`] trait is the injection seam. Production code uses
//! [`Xorshift64`]; tests can substitute a fixed or scripted source to
//! make every branch of the algorithm deterministic.

/// Source of uniform random floats in [0, 1)
///
/// Implementations must be cheap to call (one draw per insert) and must
/// not share state between instances.
pub trait RandomSource {
    /// Next uniform float in [0, 1)
    fn next_f64(&mut self) -> f64;
}

/// Simple xorshift64 PRNG, no_std compatible
#[derive(Clone, Debug)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a generator from a seed
    ///
    /// A zero seed is remapped to a fixed nonzero constant; xorshift has
    /// an all-zero fixed point.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x853c49e6748fea9b } else { seed },
        }
    }

    /// Next raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Xorshift64 {
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits scaled into [0, 1)
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Mix a 64-bit value through splitmix64
///
/// Used to decorrelate near-identical seed inputs (adjacent counter
/// values, timestamps taken in the same instant).
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

/// A fresh seed, distinct on every call within a process
///
/// Mixes wall-clock nanos with a process-wide counter so estimators
/// constructed in the same instant still get independent generators.
#[cfg(feature = "std")]
pub(crate) fn seed_from_entropy() -> u64 {
    use core::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    splitmix64(nanos ^ n.wrapping_mul(0x9e3779b97f4a7c15))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut a = Xorshift64::new(42);
        let mut b = Xorshift64::new(42);

        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_zero_seed_remapped() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_f64_range() {
        let mut rng = Xorshift64::new(12345);
        for _ in 0..100_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn test_f64_uniformity() {
        // Statistical test: each decile should receive roughly 1/10 of draws
        let mut rng = Xorshift64::new(99);
        let mut counts = [0usize; 10];
        let iterations = 100_000;

        for _ in 0..iterations {
            let v = rng.next_f64();
            counts[(v * 10.0) as usize] += 1;
        }

        let expected = iterations / 10;
        for (i, &count) in counts.iter().enumerate() {
            let deviation = (count as i64 - expected as i64).abs() as f64 / expected as f64;
            assert!(
                deviation < 0.05,
                "Decile {} received {} draws (expected ~{})",
                i,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_splitmix_decorrelates_adjacent_inputs() {
        let a = splitmix64(1);
        let b = splitmix64(2);
        // Adjacent inputs should differ in roughly half their bits
        let differing = (a ^ b).count_ones();
        assert!(differing > 16, "only {} differing bits", differing);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_entropy_seeds_distinct() {
        let a = seed_from_entropy();
        let b = seed_from_entropy();
        assert_ne!(a, b);
    }
}
