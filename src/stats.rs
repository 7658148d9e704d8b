//! Descriptive statistics.
//!
//! Every function takes any ordered numeric collection and never mutates
//! it. Inputs shorter than a statistic's mathematical domain are rejected
//! with [`StatsError::InsufficientData`]:
//!
//! | Statistic | Minimum length |
//! |---|---|
//! | mean, median, min, max, quartiles | 1 |
//! | variance, standard deviation | 2 |
//! | skewness | 3 |
//! | kurtosis | 4 |
//!
//! Zero spread is *not* an error: skewness and kurtosis of a constant
//! sequence divide by a zero standard deviation and come back NaN.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation; a constant input is
//!   returned exactly.
//! - **Variance**: two-pass sum of squared deviations, n − 1 denominator.
//! - **Quartiles**: exclusive-median halves; for odd `n` the middle element
//!   belongs to neither half.
//! - **Skewness**: adjusted Fisher-Pearson `n/((n−1)(n−2)) · Σzᵢ³`.
//! - **Kurtosis**: sample excess kurtosis
//!   `n(n+1)/((n−1)(n−2)(n−3)) · Σzᵢ⁴ − 3(n−1)²/((n−2)(n−3))`.
//!
//! Reference: Joanes & Gill (1998), "Comparing measures of sample skewness
//! and kurtosis", *The Statistician* 47(1), pp. 183–189.

use serde::{Deserialize, Serialize};

use crate::error::{require_len, Result, StatsError};

/// Computes the arithmetic mean using compensated summation.
///
/// # Errors
/// [`StatsError::InsufficientData`] if `data` is empty.
///
/// # Examples
/// ```
/// use u_statlab::stats::mean;
/// assert_eq!(mean(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap(), 30.0);
/// ```
pub fn mean(data: &[f64]) -> Result<f64> {
    require_len(data.len(), 1)?;
    // Constant input returns its value exactly so that deviations are 0.
    let first = data[0];
    if data.iter().all(|&x| x == first) {
        return Ok(first);
    }
    Ok(kahan_sum(data) / data.len() as f64)
}

/// Computes the sample variance (Bessel's correction, `n − 1`).
///
/// # Errors
/// [`StatsError::InsufficientData`] if `data.len() < 2`.
///
/// # Examples
/// ```
/// use u_statlab::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-12);
/// ```
pub fn variance(data: &[f64]) -> Result<f64> {
    require_len(data.len(), 2)?;
    let m = mean(data)?;
    Ok(sum_of_powers(data, m, 1.0, 2) / (data.len() - 1) as f64)
}

/// Computes the sample standard deviation, `√variance`.
///
/// # Examples
/// ```
/// use u_statlab::stats::std_dev;
/// let sd = std_dev(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
/// assert!((sd - 15.811388300841896).abs() < 1e-12);
/// ```
pub fn std_dev(data: &[f64]) -> Result<f64> {
    variance(data).map(f64::sqrt)
}

/// Returns the smallest value.
///
/// NaN entries are skipped by `f64::min`; they still poison the moment
/// statistics.
pub fn min(data: &[f64]) -> Result<f64> {
    require_len(data.len(), 1)?;
    Ok(data.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Returns the largest value.
pub fn max(data: &[f64]) -> Result<f64> {
    require_len(data.len(), 1)?;
    Ok(data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Returns an ascending copy of `data`.
///
/// Uses a stable sort under `f64::total_cmp`, so the result is fully
/// ordered even if NaN is present.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Median of `data`: the middle element for odd `n`, else the average of
/// the two middle elements.
///
/// # Examples
/// ```
/// use u_statlab::stats::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
/// ```
pub fn median(data: &[f64]) -> Result<f64> {
    require_len(data.len(), 1)?;
    Ok(median_sorted(&sorted(data)))
}

/// Median of non-empty, already-sorted data.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// First and third quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range, `q3 − q1`.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Quartiles by the exclusive-median method.
///
/// The sorted data is split at `⌊n/2⌋`. For even `n` the halves are the
/// first and second half; for odd `n` the middle element is excluded from
/// both. `q1` and `q3` are the medians of the lower and upper half.
///
/// A single value has empty halves; both quartiles are then that value.
///
/// # Examples
/// ```
/// use u_statlab::stats::quartiles;
/// let q = quartiles(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
/// assert_eq!((q.q1, q.q3), (15.0, 45.0));
/// ```
pub fn quartiles(data: &[f64]) -> Result<Quartiles> {
    require_len(data.len(), 1)?;
    Ok(quartiles_sorted(&sorted(data)))
}

fn quartiles_sorted(sorted: &[f64]) -> Quartiles {
    let n = sorted.len();
    if n == 1 {
        return Quartiles {
            q1: sorted[0],
            q3: sorted[0],
        };
    }
    let mid = n / 2;
    let lower = &sorted[..mid];
    let upper = if n % 2 == 0 {
        &sorted[mid..]
    } else {
        &sorted[mid + 1..]
    };
    Quartiles {
        q1: median_sorted(lower),
        q3: median_sorted(upper),
    }
}

/// Adjusted Fisher-Pearson skewness.
///
/// # Errors
/// [`StatsError::InsufficientData`] if `data.len() < 3`.
///
/// # Examples
/// ```
/// use u_statlab::stats::skewness;
/// assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap().abs() < 1e-14);
/// assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 50.0]).unwrap() > 0.0);
/// assert!(skewness(&[5.0, 5.0, 5.0]).unwrap().is_nan());
/// ```
pub fn skewness(data: &[f64]) -> Result<f64> {
    require_len(data.len(), 3)?;
    let n = data.len() as f64;
    let m = mean(data)?;
    let sd = std_dev(data)?;
    Ok(n / ((n - 1.0) * (n - 2.0)) * sum_of_powers(data, m, sd, 3))
}

/// Sample excess kurtosis (0 for a normal population).
///
/// # Errors
/// [`StatsError::InsufficientData`] if `data.len() < 4`.
///
/// # Examples
/// ```
/// use u_statlab::stats::kurtosis;
/// let flat = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert!(kurtosis(&flat).unwrap() < 0.0);
/// ```
pub fn kurtosis(data: &[f64]) -> Result<f64> {
    require_len(data.len(), 4)?;
    let n = data.len() as f64;
    let m = mean(data)?;
    let sd = std_dev(data)?;
    let scale = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
    let correction = 3.0 * (n - 1.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0));
    Ok(scale * sum_of_powers(data, m, sd, 4) - correction)
}

/// Σ((xᵢ − center) / spread)ᵏ, compensated.
fn sum_of_powers(data: &[f64], center: f64, spread: f64, k: i32) -> f64 {
    let terms: Vec<f64> = data
        .iter()
        .map(|&x| ((x - center) / spread).powi(k))
        .collect();
    kahan_sum(&terms)
}

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// Reference: Neumaier (1974), *ZAMM* 54(1), pp. 39–51.
///
/// # Examples
/// ```
/// use u_statlab::stats::kahan_sum;
/// assert_eq!(kahan_sum(&[1e16, 1.0, -1e16]), 1.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        c += if sum.abs() >= x.abs() {
            (sum - t) + x
        } else {
            (x - t) + sum
        };
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Summary record
// ---------------------------------------------------------------------------

/// The eleven descriptive statistics shown for a population, a sample, or
/// a sampling distribution.
///
/// Fields whose domain is not met by a short input are NaN: `std_dev`
/// needs 2 values, `skewness` 3, `kurtosis` 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub range: f64,
    pub iqr: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl SummaryStatistics {
    /// Summarizes `data`, sorting a single copy for the order statistics.
    ///
    /// # Errors
    /// [`StatsError::InsufficientData`] if `data` is empty.
    ///
    /// # Examples
    /// ```
    /// use u_statlab::stats::SummaryStatistics;
    /// let s = SummaryStatistics::from_data(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
    /// assert_eq!(s.median, 30.0);
    /// assert_eq!(s.iqr, 30.0);
    /// ```
    pub fn from_data(data: &[f64]) -> Result<Self> {
        require_len(data.len(), 1)?;
        let ordered = sorted(data);
        let lo = ordered[0];
        let hi = ordered[ordered.len() - 1];
        let Quartiles { q1, q3 } = quartiles_sorted(&ordered);

        Ok(Self {
            mean: mean(data)?,
            median: median_sorted(&ordered),
            min: lo,
            max: hi,
            q1,
            q3,
            range: hi - lo,
            iqr: q3 - q1,
            std_dev: or_nan(std_dev(data))?,
            skewness: or_nan(skewness(data))?,
            kurtosis: or_nan(kurtosis(data))?,
        })
    }

    /// `(label, value)` pairs in display order.
    pub fn rows(&self) -> [(&'static str, f64); 11] {
        [
            ("Mean", self.mean),
            ("Median", self.median),
            ("Min", self.min),
            ("Max", self.max),
            ("Q1", self.q1),
            ("Q3", self.q3),
            ("Range", self.range),
            ("IQR", self.iqr),
            ("Standard Deviation", self.std_dev),
            ("Skewness", self.skewness),
            ("Kurtosis", self.kurtosis),
        ]
    }
}

/// Shorthand for [`SummaryStatistics::from_data`].
pub fn summarize(data: &[f64]) -> Result<SummaryStatistics> {
    SummaryStatistics::from_data(data)
}

/// Maps an out-of-domain length to NaN, passing other errors through.
fn or_nan(value: Result<f64>) -> Result<f64> {
    match value {
        Err(StatsError::InsufficientData { .. }) => Ok(f64::NAN),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
