//! # u-statlab
//!
//! Statistical computation engine for sampling-distribution teaching labs.
//!
//! A user picks a synthetic population, draws samples from it, and
//! studies summary statistics, the sampling distribution of the mean,
//! confidence intervals and one-sample t-tests. This crate computes all
//! of it and hands back plain values; charts, forms and file dialogs
//! belong to the presentation layer.
//!
//! ## Pipeline
//!
//! ```text
//! catalog ─► population ─► sampling ─► SamplingDistribution ─┬─► interval
//!                │                              │             └─► hypothesis
//!                └────────────► stats ◄─────────┘
//! ```
//!
//! ## Modules
//!
//! - [`random`] — Uniform sources (seeded, entropy, closure, replay)
//! - [`generators`] — Box-Muller normal and power-of-uniform skewed shapes
//! - [`stats`] — Descriptive statistics with numerical stability guarantees
//! - [`sampling`] — Sampling with replacement and sampling distributions
//! - [`interval`] — z-based confidence intervals
//! - [`hypothesis`] — One-sample Student-t tests
//! - [`catalog`] — Named, versioned populations
//! - [`histogram`] — Histogram bins and density curves for charting
//! - [`export`] — CSV serialization
//! - [`special`] — Normal and Student-t distribution functions
//! - [`config`] — TOML lab configuration
//! - [`error`] — Error types
//!
//! ## Design Philosophy
//!
//! - **Values, not state**: every stage returns an owned value the caller
//!   passes to the next; nothing is kept between calls
//! - **Injectable randomness**: all draws go through
//!   [`random::UniformSource`], so tests replay fixed sequences
//! - **Property-based testing**: Mathematical invariants verified via proptest
//!
//! ## Example
//!
//! ```
//! use u_statlab::{catalog::Catalog, interval, random::create_rng, sampling::SamplingDistribution};
//!
//! let mut rng = create_rng(42);
//! let catalog = Catalog::builtin(1000, &mut rng).unwrap();
//! let heights = catalog.get("heights").unwrap();
//! let dist = SamplingDistribution::build(heights.values(), 30, 500, &mut rng).unwrap();
//! let ci = interval::compute_ci(dist.means(), 95.0).unwrap();
//! assert!(ci.contains(dist.mean()));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod histogram;
pub mod hypothesis;
pub mod interval;
pub mod random;
pub mod sampling;
pub mod special;
pub mod stats;

pub use error::{Result, StatsError};
