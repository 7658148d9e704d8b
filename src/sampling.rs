//! Sampling with replacement and sampling distributions of the mean.
//!
//! A [`SamplingDistribution`] is an owned value: the engine keeps no
//! "last run" state, so the caller threads it into
//! [`crate::interval`] and [`crate::hypothesis`] explicitly.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{require_len, Result, StatsError};
use crate::random::{uniform_index, UniformSource};
use crate::stats::{self, SummaryStatistics};

/// Draws `k` values from `population` with replacement.
///
/// Each draw independently picks an index in `[0, len)`, so duplicates
/// are allowed and `k` may exceed the population size.
///
/// # Errors
/// - [`StatsError::InvalidSampleSize`] if `k == 0`.
/// - [`StatsError::InsufficientData`] if `population` is empty.
///
/// # Examples
/// ```
/// use u_statlab::random::create_rng;
/// use u_statlab::sampling::draw_sample;
/// let sample = draw_sample(&[1.0, 2.0, 3.0], 5, &mut create_rng(0)).unwrap();
/// assert_eq!(sample.len(), 5);
/// assert!(sample.iter().all(|x| [1.0, 2.0, 3.0].contains(x)));
/// ```
pub fn draw_sample<S: UniformSource + ?Sized>(
    population: &[f64],
    k: usize,
    source: &mut S,
) -> Result<Vec<f64>> {
    if k == 0 {
        return Err(StatsError::InvalidSampleSize(k));
    }
    require_len(population.len(), 1)?;
    Ok((0..k)
        .map(|_| population[uniform_index(source, population.len())])
        .collect())
}

/// Means of `m` independent samples of size `k`.
///
/// Invariant: `means().len()` equals the number of repetitions requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingDistribution {
    sample_size: usize,
    means: Vec<f64>,
}

impl SamplingDistribution {
    /// Repeats [`draw_sample`] `m` times, keeping each sample's mean.
    ///
    /// # Errors
    /// - [`StatsError::InvalidParameters`] if `k == 0` or `m == 0`.
    /// - [`StatsError::InsufficientData`] if `population` is empty.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::random::create_rng;
    /// use u_statlab::sampling::SamplingDistribution;
    /// let pop: Vec<f64> = (1..=100).map(f64::from).collect();
    /// let dist = SamplingDistribution::build(&pop, 30, 200, &mut create_rng(4)).unwrap();
    /// assert_eq!(dist.len(), 200);
    /// assert_eq!(dist.sample_size(), 30);
    /// ```
    pub fn build<S: UniformSource + ?Sized>(
        population: &[f64],
        k: usize,
        m: usize,
        source: &mut S,
    ) -> Result<Self> {
        if k == 0 || m == 0 {
            return Err(StatsError::InvalidParameters(format!(
                "sample size and repetitions must be positive, got k={k}, m={m}"
            )));
        }
        require_len(population.len(), 1)?;

        let started = Instant::now();
        let mut means = Vec::with_capacity(m);
        for _ in 0..m {
            let sample = draw_sample(population, k, source)?;
            means.push(stats::mean(&sample)?);
        }
        debug!(
            population = population.len(),
            sample_size = k,
            repetitions = m,
            elapsed_us = started.elapsed().as_micros() as u64,
            "built sampling distribution"
        );

        Ok(Self {
            sample_size: k,
            means,
        })
    }

    /// Wraps precomputed sample means, e.g. ones read back from an export.
    ///
    /// # Errors
    /// [`StatsError::InvalidParameters`] if `sample_size == 0` or `means`
    /// is empty.
    pub fn from_means(sample_size: usize, means: Vec<f64>) -> Result<Self> {
        if sample_size == 0 || means.is_empty() {
            return Err(StatsError::InvalidParameters(format!(
                "a sampling distribution needs a positive sample size and at least one mean, \
                 got k={sample_size}, m={}",
                means.len()
            )));
        }
        Ok(Self { sample_size, means })
    }

    /// The sample means, in draw order.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Size `k` of every underlying sample.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Number of repetitions `m`.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Always `false`; construction rejects zero repetitions.
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Mean of the sample means.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.means).unwrap_or(f64::NAN)
    }

    /// Sample standard deviation of the means (`n − 1` denominator).
    pub fn std_dev(&self) -> Result<f64> {
        stats::std_dev(&self.means)
    }

    /// `std_dev / √m`.
    pub fn standard_error(&self) -> Result<f64> {
        Ok(self.std_dev()? / (self.means.len() as f64).sqrt())
    }

    /// Descriptive statistics of the means.
    pub fn summary(&self) -> Result<SummaryStatistics> {
        SummaryStatistics::from_data(&self.means)
    }

    /// Consumes the distribution, returning the means.
    pub fn into_means(self) -> Vec<f64> {
        self.means
    }
}

impl AsRef<[f64]> for SamplingDistribution {
    fn as_ref(&self) -> &[f64] {
        &self.means
    }
}

/// Shorthand for [`SamplingDistribution::build`].
pub fn sampling_distribution<S: UniformSource + ?Sized>(
    population: &[f64],
    k: usize,
    m: usize,
    source: &mut S,
) -> Result<SamplingDistribution> {
    SamplingDistribution::build(population, k, m, source)
}
