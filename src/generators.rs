//! Synthetic population generators.
//!
//! | Generator | Formula |
//! |---|---|
//! | [`normal`] | `μ + σ·√(−2 ln u₁)·cos(2π u₂)` (Box-Muller) |
//! | [`SkewShape::LowSkewCubic`] | `location + scale·u³` |
//! | [`SkewShape::HighSkewCubicInverted`] | `location − scale·u³` |
//! | [`SkewShape::QuadraticGrowth`] | `location + scale·u²` |
//! | [`SkewShape::QuadraticConcentration`] | `location + scale·u²` |
//!
//! The skewed shapes are ad-hoc teaching datasets rather than named
//! probability distributions. Both quadratic shapes share one kernel;
//! they are kept apart because the catalog labels them differently.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::random::UniformSource;

/// Draws `size` values from N(`mean`, `std_dev`²) via Box-Muller.
///
/// Each output consumes two uniforms `u₁, u₂` and keeps only the cosine
/// branch. A `u₁` of exactly `0.0` yields a non-finite value; with a
/// 53-bit uniform generator this has probability 2⁻⁵³ per draw and is
/// not special-cased.
///
/// # Examples
/// ```
/// use u_statlab::generators::normal;
/// use u_statlab::random::create_rng;
/// let data = normal(70.0, 10.0, 500, &mut create_rng(1));
/// assert_eq!(data.len(), 500);
/// ```
pub fn normal<S: UniformSource + ?Sized>(
    mean: f64,
    std_dev: f64,
    size: usize,
    source: &mut S,
) -> Vec<f64> {
    (0..size)
        .map(|_| {
            let u1 = source.next_uniform();
            let u2 = source.next_uniform();
            let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
            mean + z * std_dev
        })
        .collect()
}

/// Power-of-uniform shapes used for the skewed teaching datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkewShape {
    /// `location + scale·u³`: mass piles up just above `location`.
    LowSkewCubic,
    /// `location − scale·u³`: mass piles up just below `location`.
    HighSkewCubicInverted,
    /// `location + scale·u²`: fast early rise, long upper tail.
    QuadraticGrowth,
    /// `location + scale·u²`: values concentrated near `location`.
    QuadraticConcentration,
}

impl SkewShape {
    /// Exponent applied to the uniform variate.
    pub fn exponent(self) -> i32 {
        match self {
            SkewShape::LowSkewCubic | SkewShape::HighSkewCubicInverted => 3,
            SkewShape::QuadraticGrowth | SkewShape::QuadraticConcentration => 2,
        }
    }

    /// Maps one uniform variate through the shape's affine formula.
    pub fn transform(self, u: f64, location: f64, scale: f64) -> f64 {
        let kernel = u.powi(self.exponent());
        match self {
            SkewShape::HighSkewCubicInverted => location - kernel * scale,
            _ => location + kernel * scale,
        }
    }
}

/// Draws `size` values of the given skewed shape.
///
/// # Examples
/// ```
/// use u_statlab::generators::{skewed, SkewShape};
/// use u_statlab::random::create_rng;
/// let data = skewed(SkewShape::LowSkewCubic, 20_000.0, 50_000.0, 100, &mut create_rng(9));
/// assert!(data.iter().all(|&x| (20_000.0..=70_000.0).contains(&x)));
/// ```
pub fn skewed<S: UniformSource + ?Sized>(
    shape: SkewShape,
    location: f64,
    scale: f64,
    size: usize,
    source: &mut S,
) -> Vec<f64> {
    (0..size)
        .map(|_| shape.transform(source.next_uniform(), location, scale))
        .collect()
}

/// How a population's values are produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Recipe {
    Normal {
        mean: f64,
        std_dev: f64,
    },
    Skewed {
        shape: SkewShape,
        location: f64,
        scale: f64,
    },
}

impl Recipe {
    /// Runs the recipe for `size` values.
    pub fn generate<S: UniformSource + ?Sized>(&self, size: usize, source: &mut S) -> Vec<f64> {
        match *self {
            Recipe::Normal { mean, std_dev } => normal(mean, std_dev, size, source),
            Recipe::Skewed {
                shape,
                location,
                scale,
            } => skewed(shape, location, scale, size, source),
        }
    }

    /// Analytical mean of the recipe.
    ///
    /// For `u ~ U(0,1)`, `E[uᵏ] = 1/(k+1)`.
    pub fn expected_mean(&self) -> f64 {
        match *self {
            Recipe::Normal { mean, .. } => mean,
            Recipe::Skewed {
                shape,
                location,
                scale,
            } => {
                let moment = 1.0 / (shape.exponent() + 1) as f64;
                match shape {
                    SkewShape::HighSkewCubicInverted => location - scale * moment,
                    _ => location + scale * moment,
                }
            }
        }
    }
}
