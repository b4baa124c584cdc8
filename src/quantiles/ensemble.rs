//! Ensembles of frugal estimators
//!
//! A single frugal estimator performs a biased random walk around the
//! target quantile, so any one reading is noisy. Running several
//! independent estimators over the same stream and reporting the median
//! of their estimates reduces variance at a constant factor of memory.

use crate::quantiles::frugal::FrugalQuantile;
use crate::traits::{QuantileEstimator, StreamEstimator};

use xxhash_rust::xxh3::xxh3_64_with_seed;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Fixed-size ensemble of independent [`FrugalQuantile`] estimators
///
/// Every member targets the same quantile and sees every value in the
/// one arrival order; only the members' random sources differ. The
/// ensemble's answer is the median of the members' current estimates.
///
/// Member seeds are derived from the base seed with xxh3, so a seeded
/// ensemble is reproducible while its members stay decorrelated.
///
/// # Example
///
/// ```
/// use frugal::quantiles::FrugalEnsemble;
///
/// let mut median = FrugalEnsemble::with_seed(5, 0, 0.5, 42);
///
/// for value in 0..10_000 {
///     median.insert(value % 1000);
/// }
///
/// println!("median ≈ {}", median.median_estimate());
/// ```
#[derive(Clone, Debug)]
pub struct FrugalEnsemble {
    members: Vec<FrugalQuantile>,
    quantile: f64,
}

impl FrugalEnsemble {
    /// Create an ensemble with fresh entropy-seeded members
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn new(len: usize, initial_estimate: i64, quantile: f64) -> Self {
        Self::with_seed(
            len,
            initial_estimate,
            quantile,
            crate::random::seed_from_entropy(),
        )
    }

    /// Create an ensemble with members seeded from `seed`
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn with_seed(len: usize, initial_estimate: i64, quantile: f64, seed: u64) -> Self {
        assert!(len > 0, "ensemble needs at least one member");

        let members = (0..len as u64)
            .map(|i| {
                let member_seed = xxh3_64_with_seed(&i.to_le_bytes(), seed);
                FrugalQuantile::with_seed(initial_estimate, quantile, member_seed)
            })
            .collect();

        Self { members, quantile }
    }

    /// Feed one value to every member, sequentially
    ///
    /// Sequential fan-out keeps a single total order of observations
    /// across the ensemble.
    pub fn insert(&mut self, value: i64) {
        for member in &mut self.members {
            member.insert(value);
        }
    }

    /// Every member's current estimate, sorted ascending
    pub fn estimates(&self) -> Vec<i64> {
        let mut estimates: Vec<i64> = self.members.iter().map(|m| m.estimate()).collect();
        estimates.sort_unstable();
        estimates
    }

    /// The middle of the sorted member estimates; the ensemble's answer
    pub fn median_estimate(&self) -> i64 {
        self.estimates()[self.members.len() / 2]
    }

    /// The quantile every member targets
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// Number of member estimators
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the ensemble has no members
    ///
    /// Construction asserts at least one member, so this only returns
    /// true for a value built through `Clone`-then-truncate style
    /// manipulation, which the API does not offer; it exists to pair
    /// with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member estimators
    pub fn members(&self) -> &[FrugalQuantile] {
        &self.members
    }
}

impl StreamEstimator for FrugalEnsemble {
    type Item = i64;

    fn update(&mut self, item: &i64) {
        self.insert(*item);
    }

    fn clear(&mut self) {
        for member in &mut self.members {
            member.clear();
        }
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.members.capacity() * core::mem::size_of::<FrugalQuantile>()
    }

    fn count(&self) -> u64 {
        // Members see every value, so any one carries the stream count
        self.members.first().map(|m| m.count()).unwrap_or(0)
    }
}

impl QuantileEstimator for FrugalEnsemble {
    type Value = i64;

    fn add(&mut self, value: i64) {
        self.insert(value);
    }

    fn estimate(&self) -> i64 {
        self.median_estimate()
    }

    fn target(&self) -> f64 {
        self.quantile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RandomSource, Xorshift64};

    #[test]
    fn test_constant_stream() {
        let mut ensemble = FrugalEnsemble::with_seed(5, 0, 0.5, 1);
        for _ in 0..100 {
            ensemble.insert(7);
        }
        assert_eq!(ensemble.estimates(), [7, 7, 7, 7, 7]);
        assert_eq!(ensemble.median_estimate(), 7);
    }

    #[test]
    fn test_estimates_are_sorted() {
        let mut ensemble = FrugalEnsemble::with_seed(7, 0, 0.5, 3);
        let mut gen = Xorshift64::new(11);
        for _ in 0..5_000 {
            ensemble.insert((gen.next_f64() * 1000.0) as i64);
        }

        let estimates = ensemble.estimates();
        assert_eq!(estimates.len(), 7);
        assert!(estimates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ensemble.median_estimate(), estimates[3]);
    }

    #[test]
    fn test_members_decorrelated() {
        let mut ensemble = FrugalEnsemble::with_seed(5, 0, 0.5, 99);
        let mut gen = Xorshift64::new(12);
        for _ in 0..5_000 {
            ensemble.insert((gen.next_f64() * 1000.0) as i64);
        }

        // Independent random walks almost surely disagree somewhere
        let estimates = ensemble.estimates();
        assert!(
            estimates.iter().any(|&e| e != estimates[0]),
            "all members agreed exactly: {:?}",
            estimates
        );
    }

    #[test]
    fn test_seeded_reproducibility() {
        let mut a = FrugalEnsemble::with_seed(5, 0, 0.9, 42);
        let mut b = FrugalEnsemble::with_seed(5, 0, 0.9, 42);

        let mut gen = Xorshift64::new(13);
        for _ in 0..5_000 {
            let v = (gen.next_f64() * 1000.0) as i64;
            a.insert(v);
            b.insert(v);
        }

        assert_eq!(a.estimates(), b.estimates());
    }

    #[test]
    fn test_clear_restores_members() {
        let mut ensemble = FrugalEnsemble::with_seed(3, 42, 0.5, 5);
        for v in 0..1000 {
            ensemble.insert(v);
        }
        ensemble.clear();

        assert_eq!(ensemble.count(), 0);
        assert_eq!(ensemble.estimates(), [42, 42, 42]);
    }

    #[test]
    #[should_panic(expected = "at least one member")]
    fn test_zero_members_panics() {
        FrugalEnsemble::with_seed(0, 0, 0.5, 1);
    }
}
