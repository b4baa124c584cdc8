//! Frugal-2U streaming quantile estimator
//!
//! Implementation of Algorithm 3 from "Frugal Streaming for Estimating
//! Quantiles" (Qiang Ma, S. Muthukrishnan, and Mark Sandler, 2013,
//! <https://arxiv.org/abs/1407.1121>).
//!
//! The estimator keeps a single running estimate and, on each observed
//! value, flips a biased coin to decide whether to nudge the estimate
//! toward the observation. The step size grows while the estimate keeps
//! moving in one direction and collapses back to one unit on a direction
//! reversal, so the estimate both catches up with distribution shifts and
//! settles near the target quantile on stationary streams.
//!
//! # Thread Safety
//!
//! `FrugalQuantile` is plain single-threaded mutable state. Concurrent
//! calls on the *same* instance must be serialized by the caller.
//! Distinct instances share nothing (each owns its generator) and may be
//! driven from different threads freely.

use crate::random::{RandomSource, Xorshift64};
use crate::traits::{QuantileEstimator, StreamEstimator};

/// Pluggable step-growth strategy
///
/// Maps the current step to the increment applied on a same-direction
/// move. The default returns a constant 1, giving linear step growth per
/// direction run; alternate policies (e.g. doubling) can be injected via
/// [`FrugalQuantile::with_step_fn`] without touching the core rule.
pub type StepFn = fn(i64) -> i64;

fn constant_step(_step: i64) -> i64 {
    1
}

/// Frugal-2U single-quantile stream estimator
///
/// Estimates one quantile, fixed at construction, of a stream of `i64`
/// values in O(1) memory. The estimate is updated in O(1) per value with
/// one uniform random draw.
///
/// A single estimator is noisy; for tighter answers run several
/// independent instances over the same stream and take the median of
/// their estimates (see
/// [`FrugalEnsemble`](crate::quantiles::FrugalEnsemble)).
///
/// # Quantile Parameter
///
/// The target quantile is expected in (0, 1); `0.5` estimates the
/// median. Values outside that range are accepted uncritically — the
/// estimator then drifts toward the corresponding extreme and the
/// quality of approximation is undefined.
///
/// # Example
///
/// ```
/// use frugal::quantiles::FrugalQuantile;
///
/// let mut median = FrugalQuantile::with_seed(0, 0.5, 42);
///
/// for value in [12, 7, 9, 30, 4, 11, 6] {
///     median.insert(value);
/// }
///
/// // The estimate never leaves the observed range
/// let m = median.estimate();
/// assert!((4..=30).contains(&m));
/// ```
#[derive(Clone, Debug)]
pub struct FrugalQuantile<R = Xorshift64> {
    /// Current estimate of the target quantile
    estimate: i64,
    /// Construction-time estimate, restored by `clear`
    initial: i64,
    /// Target quantile in (0, 1)
    quantile: f64,
    /// Adjustment accumulator; may transiently go non-positive
    step: i64,
    /// -1/+1 direction of the last move, 0 before the first observation
    sign: i64,
    /// Number of values observed
    count: u64,
    /// Owned random source, never shared between instances
    rng: R,
    /// Step-growth strategy
    step_fn: StepFn,
}

impl FrugalQuantile {
    /// Create an estimator with a fresh entropy-seeded generator
    ///
    /// # Arguments
    ///
    /// * `initial_estimate` - Seed estimate; 0 or any prior guess
    /// * `quantile` - Target quantile, e.g. 0.5 for the median
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn new(initial_estimate: i64, quantile: f64) -> Self {
        Self::with_seed(initial_estimate, quantile, crate::random::seed_from_entropy())
    }

    /// Create an estimator with a seeded generator (for reproducibility)
    pub fn with_seed(initial_estimate: i64, quantile: f64, seed: u64) -> Self {
        Self::with_source(initial_estimate, quantile, Xorshift64::new(seed))
    }
}

impl<R: RandomSource> FrugalQuantile<R> {
    /// Create an estimator with a caller-supplied random source
    ///
    /// The injection seam for deterministic tests and alternate PRNGs.
    pub fn with_source(initial_estimate: i64, quantile: f64, source: R) -> Self {
        Self {
            estimate: initial_estimate,
            initial: initial_estimate,
            quantile,
            step: 1,
            sign: 0,
            count: 0,
            rng: source,
            step_fn: constant_step,
        }
    }

    /// Replace the step-growth strategy
    pub fn with_step_fn(mut self, f: StepFn) -> Self {
        self.step_fn = f;
        self
    }

    /// Current estimate of the target quantile
    ///
    /// Pure read; valid any number of times, including before any insert
    /// (then returns the initial estimate).
    pub fn estimate(&self) -> i64 {
        self.estimate
    }

    /// The quantile this estimator targets
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// Feed one value from the stream
    ///
    /// Total over all `i64` values; never fails. Adjusts the estimate on
    /// a probabilistic subset of boundary-crossing observations, which is
    /// what bounds the long-run drift toward the target quantile.
    pub fn insert(&mut self, value: i64) {
        self.count += 1;

        if self.sign == 0 {
            // First observation becomes the estimate outright.
            self.estimate = value;
            self.sign = 1;
            return;
        }

        let rnd = self.rng.next_f64();

        // The thresholds are deliberately asymmetric (1-q upward, q
        // downward); that asymmetry is what targets the q-quantile.
        if value > self.estimate && rnd > 1.0 - self.quantile {
            self.step += self.sign * (self.step_fn)(self.step);
            if self.step > 0 {
                self.estimate += self.step;
            } else {
                self.estimate += 1;
            }

            if self.estimate > value {
                // Overshot: give back the excess and land on the observation.
                self.step += value - self.estimate;
                self.estimate = value;
            }

            if self.sign < 0 && self.step > 1 {
                // A reversal must not inherit a large step from the previous run.
                self.step = 1;
            }

            self.sign = 1;
        } else if value < self.estimate && rnd > self.quantile {
            self.step += -self.sign * (self.step_fn)(self.step);
            if self.step > 0 {
                self.estimate -= self.step;
            } else {
                self.estimate -= 1;
            }

            if self.estimate < value {
                self.step += self.estimate - value;
                self.estimate = value;
            }

            if self.sign > 0 && self.step > 1 {
                self.step = 1;
            }

            self.sign = -1;
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl Default for FrugalQuantile {
    /// A median estimator starting from 0 with a fresh generator
    fn default() -> Self {
        Self::new(0, 0.5)
    }
}

impl<R: RandomSource + Clone + core::fmt::Debug> StreamEstimator for FrugalQuantile<R> {
    type Item = i64;

    fn update(&mut self, item: &i64) {
        self.insert(*item);
    }

    fn clear(&mut self) {
        self.estimate = self.initial;
        self.step = 1;
        self.sign = 0;
        self.count = 0;
        // The random source keeps advancing; rewinding it would replay
        // the pre-clear sequence.
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<R: RandomSource + Clone + core::fmt::Debug> QuantileEstimator for FrugalQuantile<R> {
    type Value = i64;

    fn add(&mut self, value: i64) {
        self.insert(value);
    }

    fn estimate(&self) -> i64 {
        self.estimate
    }

    fn target(&self) -> f64 {
        self.quantile
    }
}
