//! Chart-ready numeric data: frequency histograms and density curves.
//!
//! Nothing here renders; a presentation layer plots the returned points.

use serde::{Deserialize, Serialize};

use crate::error::{require_len, Result, StatsError};
use crate::special::{standard_normal_pdf, t_distribution_pdf};
use crate::stats;

/// Equal-width frequency histogram spanning `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    min: f64,
    bin_width: f64,
    counts: Vec<usize>,
}

impl Histogram {
    /// Bins `data` into `bins` equal-width buckets from its min to its max.
    ///
    /// A value `x` lands in bucket `⌊(x − min)/width⌋`, clamped to the last
    /// bucket so that the maximum is counted. If all values are equal the
    /// width is zero and every value lands in bucket 0.
    ///
    /// # Errors
    /// - [`StatsError::InvalidParameters`] if `bins == 0`.
    /// - [`StatsError::InsufficientData`] if `data` is empty.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::histogram::Histogram;
    /// let h = Histogram::from_data(&[0.0, 1.0, 2.0, 3.0, 4.0], 2).unwrap();
    /// assert_eq!(h.counts(), &[2, 3]);
    /// assert_eq!(h.bin_starts(), vec![0.0, 2.0]);
    /// ```
    pub fn from_data(data: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(StatsError::InvalidParameters(
                "histogram needs at least one bin".into(),
            ));
        }
        require_len(data.len(), 1)?;
        let min = stats::min(data)?;
        let max = stats::max(data)?;
        let bin_width = (max - min) / bins as f64;

        let mut counts = vec![0; bins];
        for &x in data {
            let idx = if bin_width > 0.0 {
                (((x - min) / bin_width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }
        Ok(Self {
            min,
            bin_width,
            counts,
        })
    }

    /// Left edge of each bucket.
    pub fn bin_starts(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|i| self.min + i as f64 * self.bin_width)
            .collect()
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Total number of values binned.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Normal density fitted to `means`, sampled at `points` evenly spaced
/// abscissae over `[min − 2s, max + 2s]`.
///
/// Uses the sample mean and sample standard deviation `s` of `means`.
///
/// # Errors
/// - [`StatsError::InvalidParameters`] if `points < 2` or `means` has
///   zero spread.
/// - [`StatsError::InsufficientData`] if fewer than 2 means are given.
pub fn density_curve(means: &[f64], points: usize) -> Result<Vec<(f64, f64)>> {
    if points < 2 {
        return Err(StatsError::InvalidParameters(format!(
            "density curve needs at least 2 points, got {points}"
        )));
    }
    let mean = stats::mean(means)?;
    let sd = stats::std_dev(means)?;
    if !(sd > 0.0) {
        return Err(StatsError::InvalidParameters(
            "density curve is undefined for zero spread".into(),
        ));
    }
    let lo = stats::min(means)? - 2.0 * sd;
    let hi = stats::max(means)? + 2.0 * sd;
    let step = (hi - lo) / (points - 1) as f64;

    Ok((0..points)
        .map(|i| {
            let x = lo + i as f64 * step;
            (x, standard_normal_pdf((x - mean) / sd) / sd)
        })
        .collect())
}

fn curve(lo: f64, hi: f64, step: f64, density: impl Fn(f64) -> f64) -> Result<Vec<(f64, f64)>> {
    if !(step > 0.0) || !lo.is_finite() || !hi.is_finite() || hi < lo {
        return Err(StatsError::InvalidParameters(format!(
            "invalid curve range [{lo}, {hi}] with step {step}"
        )));
    }
    // Tolerance keeps `hi` itself when (hi − lo)/step is integral up to rounding.
    let n = ((hi - lo) / step + 1e-9).floor() as usize + 1;
    Ok((0..n)
        .map(|i| {
            let t = lo + i as f64 * step;
            (t, density(t))
        })
        .collect())
}

/// `(t, φ(t))` for `t = lo, lo + step, …, ≤ hi`.
///
/// # Examples
/// ```
/// use u_statlab::histogram::standard_normal_curve;
/// let pts = standard_normal_curve(-4.0, 4.0, 0.1).unwrap();
/// assert_eq!(pts.len(), 81);
/// ```
pub fn standard_normal_curve(lo: f64, hi: f64, step: f64) -> Result<Vec<(f64, f64)>> {
    curve(lo, hi, step, standard_normal_pdf)
}

/// `(t, f(t; df))` for the Student-t density, on the same grid as
/// [`standard_normal_curve`].
pub fn t_curve(lo: f64, hi: f64, step: f64, df: f64) -> Result<Vec<(f64, f64)>> {
    if !(df > 0.0) {
        return Err(StatsError::InvalidParameters(format!(
            "degrees of freedom must be positive, got {df}"
        )));
    }
    curve(lo, hi, step, |t| t_distribution_pdf(t, df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_max_lands_in_last_bin() {
        let h = Histogram::from_data(&[0.0, 10.0], 10).unwrap();
        assert_eq!(h.counts()[0], 1);
        assert_eq!(h.counts()[9], 1);
        assert_eq!(h.bin_width(), 1.0);
    }

    #[test]
    fn test_constant_data_goes_to_first_bin() {
        let h = Histogram::from_data(&[3.0; 7], 10).unwrap();
        assert_eq!(h.counts()[0], 7);
        assert_eq!(h.total(), 7);
        assert_eq!(h.bin_width(), 0.0);
    }

    #[test]
    fn test_bin_starts() {
        let h = Histogram::from_data(&[10.0, 20.0, 30.0, 40.0, 50.0], 4).unwrap();
        assert_eq!(h.bin_starts(), vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(h.counts(), &[1, 1, 1, 2]);
    }

    #[test]
    fn test_histogram_errors() {
        assert!(matches!(
            Histogram::from_data(&[1.0], 0),
            Err(StatsError::InvalidParameters(_))
        ));
        assert_eq!(
            Histogram::from_data(&[], 5),
            Err(StatsError::InsufficientData { needed: 1, got: 0 })
        );
    }

    #[test]
    fn test_density_curve_peak_and_span() {
        let means = [9.0, 10.0, 11.0];
        let pts = density_curve(&means, 101).unwrap();
        assert_eq!(pts.len(), 101);
        assert_abs_diff_eq!(pts[0].0, 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[100].0, 13.0, epsilon = 1e-12);
        // Mid-point sits at the mean: φ(0)/s with s = 1.
        assert_abs_diff_eq!(pts[50].1, standard_normal_pdf(0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_density_curve_errors() {
        assert!(density_curve(&[1.0, 2.0], 1).is_err());
        assert!(density_curve(&[1.0, 1.0, 1.0], 10).is_err());
        assert!(matches!(
            density_curve(&[1.0], 10),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_standard_normal_curve_grid() {
        let pts = standard_normal_curve(-4.0, 4.0, 0.1).unwrap();
        assert_abs_diff_eq!(pts[40].0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[40].1, 0.3989422804014327, epsilon = 1e-12);
        assert!(standard_normal_curve(0.0, 1.0, 0.0).is_err());
        assert!(standard_normal_curve(1.0, 0.0, 0.1).is_err());
    }

    #[test]
    fn test_t_curve_has_heavier_tails() {
        let normal = standard_normal_curve(-4.0, 4.0, 0.5).unwrap();
        let t = t_curve(-4.0, 4.0, 0.5, 3.0).unwrap();
        assert_eq!(normal.len(), t.len());
        assert!(t[0].1 > normal[0].1);
        assert!(t_curve(-1.0, 1.0, 0.1, 0.0).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn histogram_counts_every_value(
            data in proptest::collection::vec(-1e6_f64..1e6, 1..300),
            bins in 1_usize..50,
        ) {
            let h = Histogram::from_data(&data, bins).unwrap();
            prop_assert_eq!(h.counts().len(), bins);
            prop_assert_eq!(h.total(), data.len());
        }
    }
}
