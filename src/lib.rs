//! # Frugal
//!
//! Streaming quantile estimation in O(1) memory.
//!
//! This crate implements the frugal streaming quantile algorithm
//! ("Frugal-2U", Algorithm 3 from Ma, Muthukrishnan and Sandler 2013,
//! <https://arxiv.org/abs/1407.1121>): a single stateful estimator that
//! consumes one value at a time and nudges a running estimate toward the
//! target quantile with a randomized step-adjustment rule. One estimator
//! is a handful of machine words; an ensemble of independent estimators
//! trades a constant factor of memory for lower variance.
//!
//! ## Quick Start
//!
//! ```rust
//! use frugal::prelude::*;
//!
//! // Track the median of a stream
//! let mut median = FrugalQuantile::with_seed(0, 0.5, 42);
//! for value in 0..10_000 {
//!     median.insert(value % 1000);
//! }
//! println!("median ≈ {}", median.estimate());
//! ```
//!
//! ## Ensembling
//!
//! A single frugal estimator is noisy. The standard remedy is to run
//! several independent estimators over the same stream and report the
//! median of their estimates:
//!
//! ```rust
//! use frugal::quantiles::FrugalEnsemble;
//!
//! let mut p90 = FrugalEnsemble::with_seed(5, 0, 0.9, 7);
//! for value in 0..10_000 {
//!     p90.insert(value % 1000);
//! }
//! println!("p90 ≈ {}", p90.median_estimate());
//! ```
//!
//! ## Determinism
//!
//! Every estimator owns its random generator. Construction with
//! [`FrugalQuantile::with_seed`] is fully reproducible, and
//! [`FrugalQuantile::with_source`] accepts any
//! [`RandomSource`](random::RandomSource) implementation, so tests can
//! fix or mock the random sequence outright.
//!
//! ## Feature Flags
//!
//! - `std` (default): standard library support (entropy-seeded
//!   constructors, `Default` impls)
//! - `cli`: the reference command-line driver (`frugal` binary)

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod quantiles;
pub mod random;
pub mod traits;

pub mod prelude {
    pub use crate::quantiles::{FrugalEnsemble, FrugalQuantile};
    pub use crate::random::{RandomSource, Xorshift64};
    pub use crate::traits::*;
}

pub use quantiles::{FrugalEnsemble, FrugalQuantile};
