//! Lab configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or none at all) yields
//! [`LabConfig::default`].

use std::fs;
use std::path::Path;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{builtin_defs, Catalog, PopulationDef, DEFAULT_POPULATION_SIZE};
use crate::error::{ConfigError, StatsError};
use crate::random::{create_rng, entropy_rng, UniformSource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabConfig {
    /// Values per built-in population.
    #[serde(default = "LabConfig::default_population_size")]
    pub population_size: usize,
    #[serde(default = "LabConfig::default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default = "LabConfig::default_density_points")]
    pub density_points: usize,
    #[serde(default = "LabConfig::default_sample_size")]
    pub default_sample_size: usize,
    #[serde(default = "LabConfig::default_repetitions")]
    pub default_repetitions: usize,
    /// Percent, in `(0, 100]`.
    #[serde(default = "LabConfig::default_confidence_level")]
    pub default_confidence_level: f64,
    /// In `(0, 1]`.
    #[serde(default = "LabConfig::default_significance_level")]
    pub default_significance_level: f64,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Replaces the built-in catalog when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub populations: Vec<PopulationDef>,
}

impl LabConfig {
    fn default_population_size() -> usize {
        DEFAULT_POPULATION_SIZE
    }
    fn default_histogram_bins() -> usize {
        10
    }
    fn default_density_points() -> usize {
        100
    }
    fn default_sample_size() -> usize {
        30
    }
    fn default_repetitions() -> usize {
        1000
    }
    fn default_confidence_level() -> f64 {
        95.0
    }
    fn default_significance_level() -> f64 {
        0.05
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses, and validates `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Loads `path`, falling back to defaults on any error.
    ///
    /// A missing file is created with the defaults written as comments.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return match Self::load(path) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!(path = %path.display(), %err, "using default lab config");
                    Self::default()
                }
            };
        }

        let cfg = Self::default();
        match toml::to_string_pretty(&cfg) {
            Ok(text) => {
                let commented: String = text
                    .lines()
                    .map(|line| {
                        if line.trim().is_empty() {
                            "\n".to_string()
                        } else {
                            format!("# {line}\n")
                        }
                    })
                    .collect();
                if let Err(err) = fs::write(path, commented) {
                    warn!(path = %path.display(), %err, "failed to write default lab config");
                }
            }
            Err(err) => warn!(%err, "failed to serialize default lab config"),
        }
        cfg
    }

    /// Checks every field against its domain.
    pub fn validate(&self) -> Result<(), StatsError> {
        let positive = [
            ("population_size", self.population_size),
            ("histogram_bins", self.histogram_bins),
            ("default_sample_size", self.default_sample_size),
            ("default_repetitions", self.default_repetitions),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(StatsError::InvalidParameters(format!("{field} must be positive")));
            }
        }
        if self.density_points < 2 {
            return Err(StatsError::InvalidParameters(format!(
                "density_points must be at least 2, got {}",
                self.density_points
            )));
        }
        let level = self.default_confidence_level;
        if !(level > 0.0 && level <= 100.0) {
            return Err(StatsError::InvalidConfidenceLevel(level));
        }
        let alpha = self.default_significance_level;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(StatsError::InvalidSignificanceLevel(alpha));
        }
        Ok(())
    }

    /// Seeded from [`LabConfig::seed`] when set, otherwise from OS entropy.
    pub fn rng_source(&self) -> SmallRng {
        match self.seed {
            Some(seed) => create_rng(seed),
            None => entropy_rng(),
        }
    }

    /// Builds the configured catalog, or the built-in one if none is given.
    pub fn catalog<S: UniformSource + ?Sized>(&self, source: &mut S) -> Result<Catalog, StatsError> {
        let defs = if self.populations.is_empty() {
            builtin_defs(self.population_size)
        } else {
            self.populations.clone()
        };
        Catalog::generate(defs, source)
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            population_size: Self::default_population_size(),
            histogram_bins: Self::default_histogram_bins(),
            density_points: Self::default_density_points(),
            default_sample_size: Self::default_sample_size(),
            default_repetitions: Self::default_repetitions(),
            default_confidence_level: Self::default_confidence_level(),
            default_significance_level: Self::default_significance_level(),
            seed: None,
            populations: Vec::new(),
        }
    }
}
