//! One-sample t-tests on a sampling distribution.
//!
//! # Algorithm
//! With `m` sample means, mean `x̄`, sample standard deviation `s` and
//! `df = m − 1`:
//!
//! ```text
//! SE = s / √m
//! t  = (x̄ − μ₀) / SE
//! ```
//!
//! | Test | Critical values | p-value |
//! |---|---|---|
//! | two-tailed | `∓t_{1−α/2}` | `2·(1 − F(|t|))` |
//! | one-tailed-lower | `(−t_{1−α}, 0)` | `F(t)` |
//! | one-tailed-upper | `(0, t_{1−α})` | `1 − F(t)` |
//!
//! # Decision rule
//! H₀ is rejected iff `p < α`. The critical values are reported for
//! plotting; [`HypothesisTestResult::in_rejection_region`] uses only the
//! tail(s) that the alternative points to, so the two views agree except
//! exactly on the boundary, where the p-value rule wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StatsError};
use crate::special::{t_distribution_cdf, t_distribution_quantile};
use crate::stats;

/// Minimum number of sample means for a t-test (`df ≥ 3`).
pub const MIN_SAMPLES: usize = 4;

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestType {
    /// Hₐ: μ ≠ μ₀
    TwoTailed,
    /// Hₐ: μ < μ₀
    OneTailedLower,
    /// Hₐ: μ > μ₀
    OneTailedUpper,
}

impl TestType {
    /// The token accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            TestType::TwoTailed => "two-tailed",
            TestType::OneTailedLower => "one-tailed-lower",
            TestType::OneTailedUpper => "one-tailed-upper",
        }
    }

    /// Relation stated by H₀.
    pub fn null_relation(self) -> &'static str {
        match self {
            TestType::TwoTailed => "=",
            TestType::OneTailedLower => "≥",
            TestType::OneTailedUpper => "≤",
        }
    }

    /// Relation stated by Hₐ.
    pub fn alternative_relation(self) -> &'static str {
        match self {
            TestType::TwoTailed => "≠",
            TestType::OneTailedLower => "<",
            TestType::OneTailedUpper => ">",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-tailed" => Ok(TestType::TwoTailed),
            "one-tailed-lower" => Ok(TestType::OneTailedLower),
            "one-tailed-upper" => Ok(TestType::OneTailedUpper),
            _ => Err(StatsError::InvalidTestType(s.to_string())),
        }
    }
}

/// Parses a null-hypothesis mean from `"Mean = <value>"` or a bare number.
///
/// The `mean` keyword is matched case-insensitively anywhere in the text,
/// so `"H0: mean=72.5"` is accepted. Everything after `=` must be the
/// number: trailing text such as a unit (`"Mean = 70 kg"`) is rejected
/// rather than ignored.
///
/// # Errors
/// [`StatsError::InvalidNullHypothesis`] if no number can be read or it is
/// not finite.
///
/// # Examples
/// ```
/// use u_statlab::hypothesis::parse_null_mean;
/// assert_eq!(parse_null_mean("Mean = 70").unwrap(), 70.0);
/// assert_eq!(parse_null_mean(" -3.5 ").unwrap(), -3.5);
/// assert!(parse_null_mean("Mean is 70").is_err());
/// ```
pub fn parse_null_mean(text: &str) -> Result<f64> {
    let invalid = || StatsError::InvalidNullHypothesis(text.to_string());
    let trimmed = text.trim();
    let value = match trimmed.to_ascii_lowercase().find("mean") {
        Some(pos) => trimmed[pos + "mean".len()..]
            .trim_start()
            .strip_prefix('=')
            .ok_or_else(invalid)?
            .trim(),
        None => trimmed,
    };
    let mean: f64 = value.parse().map_err(|_| invalid())?;
    if !mean.is_finite() {
        return Err(invalid());
    }
    Ok(mean)
}

/// A configured one-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTest {
    null_mean: f64,
    test_type: TestType,
    significance_level: f64,
}

impl HypothesisTest {
    /// # Errors
    /// - [`StatsError::InvalidNullHypothesis`] if `null_mean` is not finite.
    /// - [`StatsError::InvalidSignificanceLevel`] if `significance_level`
    ///   is outside `(0, 1]`.
    pub fn new(null_mean: f64, test_type: TestType, significance_level: f64) -> Result<Self> {
        if !null_mean.is_finite() {
            return Err(StatsError::InvalidNullHypothesis(null_mean.to_string()));
        }
        if !(significance_level > 0.0 && significance_level <= 1.0) {
            return Err(StatsError::InvalidSignificanceLevel(significance_level));
        }
        Ok(Self {
            null_mean,
            test_type,
            significance_level,
        })
    }

    pub fn null_mean(&self) -> f64 {
        self.null_mean
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// H₀ and Hₐ as readable statements, e.g. `"population mean ≥ 70"`.
    pub fn hypotheses(&self) -> (String, String) {
        (
            format!("population mean {} {}", self.test_type.null_relation(), self.null_mean),
            format!(
                "population mean {} {}",
                self.test_type.alternative_relation(),
                self.null_mean
            ),
        )
    }

    /// Runs the test against a sampling distribution's means.
    ///
    /// # Errors
    /// [`StatsError::InsufficientSamples`] if fewer than [`MIN_SAMPLES`]
    /// means are given.
    pub fn run(&self, means: &[f64]) -> Result<HypothesisTestResult> {
        let m = means.len();
        if m < MIN_SAMPLES {
            return Err(StatsError::InsufficientSamples {
                needed: MIN_SAMPLES,
                got: m,
            });
        }
        let df = (m - 1) as f64;
        let alpha = self.significance_level;

        let sample_mean = stats::mean(means)?;
        let std_dev = stats::std_dev(means)?;
        let standard_error = std_dev / (m as f64).sqrt();
        if standard_error == 0.0 {
            warn!(m, "t-test over zero-spread distribution; t is not finite");
        }
        let t_statistic = (sample_mean - self.null_mean) / standard_error;

        let (critical_low, critical_high) = match self.test_type {
            TestType::TwoTailed => {
                let q = t_distribution_quantile(1.0 - alpha / 2.0, df);
                (-q, q)
            }
            TestType::OneTailedLower => (-t_distribution_quantile(1.0 - alpha, df), 0.0),
            TestType::OneTailedUpper => (0.0, t_distribution_quantile(1.0 - alpha, df)),
        };

        let p_value = match self.test_type {
            TestType::TwoTailed => 2.0 * (1.0 - t_distribution_cdf(t_statistic.abs(), df)),
            TestType::OneTailedLower => t_distribution_cdf(t_statistic, df),
            TestType::OneTailedUpper => 1.0 - t_distribution_cdf(t_statistic, df),
        };

        Ok(HypothesisTestResult {
            null_mean: self.null_mean,
            test_type: self.test_type,
            significance_level: alpha,
            sample_mean,
            std_dev,
            standard_error,
            degrees_of_freedom: df,
            t_statistic,
            critical_low,
            critical_high,
            p_value,
            reject_null: p_value < alpha,
        })
    }
}

/// Outcome of a [`HypothesisTest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTestResult {
    pub null_mean: f64,
    pub test_type: TestType,
    pub significance_level: f64,
    pub sample_mean: f64,
    pub std_dev: f64,
    pub standard_error: f64,
    pub degrees_of_freedom: f64,
    pub t_statistic: f64,
    /// Lower critical t; `0.0` for an upper-tailed test.
    pub critical_low: f64,
    /// Upper critical t; `0.0` for a lower-tailed test.
    pub critical_high: f64,
    pub p_value: f64,
    /// `p_value < significance_level`.
    pub reject_null: bool,
}

impl HypothesisTestResult {
    /// Whether `t` lies in the rejection tail(s) of this test.
    ///
    /// The `0.0` placeholder of a one-tailed test is not a boundary.
    pub fn in_rejection_region(&self, t: f64) -> bool {
        match self.test_type {
            TestType::TwoTailed => t < self.critical_low || t > self.critical_high,
            TestType::OneTailedLower => t < self.critical_low,
            TestType::OneTailedUpper => t > self.critical_high,
        }
    }
}

/// Parses the textual inputs and runs the test.
///
/// # Examples
/// ```
/// use u_statlab::hypothesis::run_hypothesis_test;
/// let means = [69.0, 71.0, 70.5, 69.5, 70.0, 70.2];
/// let r = run_hypothesis_test(&means, "Mean = 70", "two-tailed", 0.05).unwrap();
/// assert!(!r.reject_null);
/// ```
pub fn run_hypothesis_test(
    means: &[f64],
    null_hypothesis: &str,
    test_type: &str,
    significance_level: f64,
) -> Result<HypothesisTestResult> {
    let test_type: TestType = test_type.parse()?;
    let null_mean = parse_null_mean(null_hypothesis)?;
    HypothesisTest::new(null_mean, test_type, significance_level)?.run(means)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// mean 100, sd 10, m = 25 → SE = 2
    fn fixture() -> Vec<f64> {
        let mut v = vec![100.0];
        for _ in 0..12 {
            v.push(110.0);
            v.push(90.0);
        }
        v
    }

    fn run(null: f64, tt: TestType, alpha: f64) -> HypothesisTestResult {
        HypothesisTest::new(null, tt, alpha)
            .unwrap()
            .run(&fixture())
            .unwrap()
    }

    #[test]
    fn test_parse_test_type() {
        assert_eq!("two-tailed".parse::<TestType>().unwrap(), TestType::TwoTailed);
        assert_eq!(" One-Tailed-Upper ".parse::<TestType>().unwrap(), TestType::OneTailedUpper);
        assert_eq!(
            "left".parse::<TestType>(),
            Err(StatsError::InvalidTestType("left".into()))
        );
        assert_eq!(TestType::OneTailedLower.to_string(), "one-tailed-lower");
    }

    #[test]
    fn test_parse_null_mean_forms() {
        assert_eq!(parse_null_mean("Mean = 70").unwrap(), 70.0);
        assert_eq!(parse_null_mean("mean=72.5").unwrap(), 72.5);
        assert_eq!(parse_null_mean("H0: MEAN =  150000").unwrap(), 150_000.0);
        assert_eq!(parse_null_mean("42").unwrap(), 42.0);
    }

    #[test]
    fn test_parse_null_mean_rejects() {
        for bad in ["", "Mean =", "Mean: 70", "mean = abc", "Mean = inf", "NaN"] {
            assert!(
                matches!(parse_null_mean(bad), Err(StatsError::InvalidNullHypothesis(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_null_equal_to_mean() {
        let r = run(100.0, TestType::TwoTailed, 0.05);
        assert_eq!(r.t_statistic, 0.0);
        assert_eq!(r.p_value, 1.0);
        assert!(!r.reject_null);
        assert_abs_diff_eq!(r.standard_error, 2.0, epsilon = 1e-12);
        assert_eq!(r.degrees_of_freedom, 24.0);
    }

    #[test]
    fn test_two_tailed_reference() {
        // t = (100 − 95)/2 = 2.5, df = 24
        let r = run(95.0, TestType::TwoTailed, 0.05);
        assert_abs_diff_eq!(r.t_statistic, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(r.critical_high, 2.063899, epsilon = 1e-5);
        assert_abs_diff_eq!(r.critical_low, -2.063899, epsilon = 1e-5);
        assert_abs_diff_eq!(r.p_value, 0.019654, epsilon = 1e-6);
        assert!(r.reject_null);
        assert!(r.in_rejection_region(r.t_statistic));
    }

    #[test]
    fn test_one_tailed_upper() {
        let r = run(95.0, TestType::OneTailedUpper, 0.05);
        assert_eq!(r.critical_low, 0.0);
        assert_abs_diff_eq!(r.critical_high, 1.710882, epsilon = 1e-5);
        assert_abs_diff_eq!(r.p_value, 0.009827, epsilon = 1e-6);
        assert!(r.reject_null);
    }

    #[test]
    fn test_one_tailed_lower_wrong_direction() {
        // Sample mean above μ₀: no evidence for Hₐ: μ < μ₀.
        let r = run(95.0, TestType::OneTailedLower, 0.05);
        assert_abs_diff_eq!(r.critical_low, -1.710882, epsilon = 1e-5);
        assert_eq!(r.critical_high, 0.0);
        assert!(r.p_value > 0.99);
        assert!(!r.reject_null);
        // t > 0 lies outside [critical_low, 0] but is not a rejection.
        assert!(!r.in_rejection_region(r.t_statistic));
    }

    #[test]
    fn test_one_tailed_lower_rejects() {
        let r = run(104.0, TestType::OneTailedLower, 0.05);
        assert_abs_diff_eq!(r.t_statistic, -2.0, epsilon = 1e-12);
        assert!(r.reject_null);
        assert!(r.in_rejection_region(r.t_statistic));
    }

    #[test]
    fn test_zero_spread_null_at_mean() {
        let means = vec![0.1; 8];
        let r = HypothesisTest::new(0.1, TestType::TwoTailed, 0.05)
            .unwrap()
            .run(&means)
            .unwrap();
        assert_eq!(r.standard_error, 0.0);
        assert!(r.t_statistic.is_nan());
        assert!(r.p_value.is_nan());
        assert!(!r.reject_null);
    }

    #[test]
    fn test_zero_spread_null_away_from_mean() {
        let means = vec![0.1; 8];
        let two = HypothesisTest::new(0.0, TestType::TwoTailed, 0.05)
            .unwrap()
            .run(&means)
            .unwrap();
        assert_eq!(two.t_statistic, f64::INFINITY);
        assert_eq!(two.p_value, 0.0);
        assert!(two.reject_null);

        let lower = HypothesisTest::new(0.2, TestType::OneTailedLower, 0.05)
            .unwrap()
            .run(&means)
            .unwrap();
        assert_eq!(lower.t_statistic, f64::NEG_INFINITY);
        assert_eq!(lower.p_value, 0.0);
        assert!(lower.reject_null);
    }

    #[test]
    fn test_null_mean_rejects_trailing_text() {
        assert!(matches!(
            parse_null_mean("Mean = 70 kg"),
            Err(StatsError::InvalidNullHypothesis(_))
        ));
    }

    #[test]
    fn test_insufficient_samples() {
        let test = HypothesisTest::new(0.0, TestType::TwoTailed, 0.05).unwrap();
        assert_eq!(
            test.run(&[1.0, 2.0, 3.0]),
            Err(StatsError::InsufficientSamples { needed: 4, got: 3 })
        );
        assert!(test.run(&[1.0, 2.0, 3.0, 4.0]).is_ok());
    }

    #[test]
    fn test_invalid_significance_level() {
        for alpha in [0.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                HypothesisTest::new(0.0, TestType::TwoTailed, alpha),
                Err(StatsError::InvalidSignificanceLevel(_))
            ));
        }
        assert!(HypothesisTest::new(0.0, TestType::TwoTailed, 1.0).is_ok());
    }

    #[test]
    fn test_non_finite_null_mean() {
        assert!(matches!(
            HypothesisTest::new(f64::INFINITY, TestType::TwoTailed, 0.05),
            Err(StatsError::InvalidNullHypothesis(_))
        ));
    }

    #[test]
    fn test_run_hypothesis_test_parses_inputs() {
        let means = fixture();
        let r = run_hypothesis_test(&means, "Mean = 95", "one-tailed-upper", 0.01).unwrap();
        assert_eq!(r.test_type, TestType::OneTailedUpper);
        assert!(r.reject_null);
        assert!(matches!(
            run_hypothesis_test(&means, "Mean = 95", "both", 0.01),
            Err(StatsError::InvalidTestType(_))
        ));
        assert!(matches!(
            run_hypothesis_test(&means, "μ = 95", "two-tailed", 0.01),
            Err(StatsError::InvalidNullHypothesis(_))
        ));
    }

    #[test]
    fn test_hypotheses_text() {
        let t = HypothesisTest::new(70.0, TestType::OneTailedLower, 0.05).unwrap();
        let (h0, ha) = t.hypotheses();
        assert_eq!(h0, "population mean ≥ 70");
        assert_eq!(ha, "population mean < 70");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_test_type() -> impl Strategy<Value = TestType> {
        prop_oneof![
            Just(TestType::TwoTailed),
            Just(TestType::OneTailedLower),
            Just(TestType::OneTailedUpper),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn p_value_is_a_probability(
            means in proptest::collection::vec(-1e3_f64..1e3, 4..60),
            null in -1e3_f64..1e3,
            tt in any_test_type(),
            alpha in 0.001_f64..0.5,
        ) {
            let r = HypothesisTest::new(null, tt, alpha).unwrap().run(&means).unwrap();
            prop_assert!((0.0..=1.0).contains(&r.p_value), "p={}", r.p_value);
            prop_assert_eq!(r.reject_null, r.p_value < alpha);
        }

        #[test]
        fn critical_region_agrees_with_p_value(
            means in proptest::collection::vec(-1e3_f64..1e3, 4..60),
            null in -1e3_f64..1e3,
            tt in any_test_type(),
            alpha in 0.01_f64..0.2,
        ) {
            let r = HypothesisTest::new(null, tt, alpha).unwrap().run(&means).unwrap();
            let boundary = (r.p_value - alpha).abs() < 1e-6;
            prop_assume!(!boundary);
            prop_assert_eq!(r.in_rejection_region(r.t_statistic), r.reject_null);
        }

        #[test]
        fn one_tailed_p_values_are_complementary(
            means in proptest::collection::vec(-1e3_f64..1e3, 4..60),
            null in -1e3_f64..1e3,
        ) {
            let lo = HypothesisTest::new(null, TestType::OneTailedLower, 0.05).unwrap().run(&means).unwrap();
            let hi = HypothesisTest::new(null, TestType::OneTailedUpper, 0.05).unwrap().run(&means).unwrap();
            prop_assert!((lo.p_value + hi.p_value - 1.0).abs() < 1e-12);
        }
    }
}
