//! Core traits for streaming estimators
//!
//! The base [`StreamEstimator`] trait covers bookkeeping common to all
//! constant-memory stream summaries; [`QuantileEstimator`] specializes it
//! for estimators that track a single order statistic.

use core::fmt::Debug;

/// Core trait for all streaming estimators
pub trait StreamEstimator: Clone + Debug {
    /// The type of item this estimator processes
    type Item: ?Sized;

    /// Feed an item to the estimator
    fn update(&mut self, item: &Self::Item);

    /// Reset the estimator to its construction state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if the estimator has seen any items
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Estimators that track a single quantile of a stream
///
/// Unlike a full quantile sketch, a frugal-style estimator targets one
/// quantile fixed at construction and answers only for that target.
pub trait QuantileEstimator: StreamEstimator {
    /// The value type being tracked
    type Value: PartialOrd + Clone;

    /// Add a value to the estimator
    fn add(&mut self, value: Self::Value);

    /// Current estimate of the target quantile
    ///
    /// Total: before any value is added this returns the initial
    /// estimate supplied at construction.
    fn estimate(&self) -> Self::Value;

    /// The quantile this estimator targets (0.0 to 1.0)
    ///
    /// target=0.5 estimates the median
    fn target(&self) -> f64;
}
