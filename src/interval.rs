//! Confidence intervals for the mean of a sampling distribution.
//!
//! # Algorithm
//! For a distribution of `m` sample means with mean `x̄` and sample
//! standard deviation `s`:
//!
//! ```text
//! α   = 1 − level/100
//! z   = −Φ⁻¹(α/2)
//! MoE = z · s / √m
//! CI  = [x̄ − MoE, x̄ + MoE]
//! ```
//!
//! A level of exactly 100 gives `z = +∞` and an unbounded interval,
//! unless the means have zero spread, in which case every level
//! collapses to the single point `x̄`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{require_len, Result, StatsError};
use crate::special::inverse_normal_cdf;
use crate::stats;

/// A two-sided z-interval around the mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Confidence level in percent, in `(0, 100]`.
    pub confidence_level: f64,
    pub mean: f64,
    /// Two-sided critical value `z_{α/2}`.
    pub z_score: f64,
    /// Half-width of the interval.
    pub margin_of_error: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl ConfidenceInterval {
    /// Builds the interval for `means` at `confidence_level` percent.
    ///
    /// # Errors
    /// - [`StatsError::InvalidConfidenceLevel`] if the level is outside
    ///   `(0, 100]` or NaN.
    /// - [`StatsError::InsufficientData`] if fewer than 2 means are given.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::interval::ConfidenceInterval;
    /// let ci = ConfidenceInterval::compute(&[98.0, 100.0, 102.0], 95.0).unwrap();
    /// assert!(ci.lower_bound < 100.0 && 100.0 < ci.upper_bound);
    /// ```
    pub fn compute(means: &[f64], confidence_level: f64) -> Result<Self> {
        let z_score = z_critical(confidence_level)?;
        require_len(means.len(), 2)?;
        let mean = stats::mean(means)?;
        let sd = stats::std_dev(means)?;
        if sd == 0.0 {
            warn!(m = means.len(), "confidence interval over zero-spread distribution");
        }
        Ok(Self::from_moments(
            confidence_level,
            z_score,
            mean,
            sd / (means.len() as f64).sqrt(),
        ))
    }

    fn from_moments(confidence_level: f64, z_score: f64, mean: f64, standard_error: f64) -> Self {
        // Zero spread collapses the interval even at z = ∞.
        let margin_of_error = if standard_error == 0.0 {
            0.0
        } else {
            z_score * standard_error
        };
        Self {
            confidence_level,
            mean,
            z_score,
            margin_of_error,
            lower_bound: mean - margin_of_error,
            upper_bound: mean + margin_of_error,
        }
    }

    /// `upper_bound − lower_bound`.
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Whether `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        (self.lower_bound..=self.upper_bound).contains(&value)
    }
}

/// Two-sided normal critical value for `confidence_level` percent.
///
/// # Errors
/// [`StatsError::InvalidConfidenceLevel`] if the level is outside
/// `(0, 100]` or NaN.
///
/// # Examples
/// ```
/// use u_statlab::interval::z_critical;
/// assert!((z_critical(95.0).unwrap() - 1.959964).abs() < 1e-6);
/// ```
pub fn z_critical(confidence_level: f64) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level <= 100.0) {
        return Err(StatsError::InvalidConfidenceLevel(confidence_level));
    }
    let alpha = 1.0 - confidence_level / 100.0;
    Ok(-inverse_normal_cdf(alpha / 2.0))
}

/// Shorthand for [`ConfidenceInterval::compute`].
pub fn compute_ci(means: &[f64], confidence_level: f64) -> Result<ConfidenceInterval> {
    ConfidenceInterval::compute(means, confidence_level)
}

/// Intervals for several levels over the same distribution.
///
/// Mean and standard error are computed once; results follow the order
/// of `levels`. Fails on the first invalid level.
///
/// # Examples
/// ```
/// use u_statlab::interval::compare_levels;
/// let means = [9.0, 10.0, 11.0, 10.5, 9.5];
/// let cis = compare_levels(&means, &[80.0, 90.0, 99.0]).unwrap();
/// assert!(cis[0].width() < cis[1].width() && cis[1].width() < cis[2].width());
/// ```
pub fn compare_levels(means: &[f64], levels: &[f64]) -> Result<Vec<ConfidenceInterval>> {
    require_len(means.len(), 2)?;
    let mean = stats::mean(means)?;
    let se = stats::std_dev(means)? / (means.len() as f64).sqrt();
    levels
        .iter()
        .map(|&level| {
            let z = z_critical(level)?;
            Ok(ConfidenceInterval::from_moments(level, z, mean, se))
        })
        .collect()
}
