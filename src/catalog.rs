//! Named synthetic populations.
//!
//! A [`Catalog`] owns one [`Population`] per [`PopulationDef`]. Values are
//! stored behind `Arc<[f64]>` and never mutated: [`Catalog::regenerate`]
//! swaps in a fresh allocation and bumps the version, so a reader that
//! cloned the previous `Arc` keeps a consistent snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::generators::{Recipe, SkewShape};
use crate::random::{shuffle, UniformSource};
use crate::stats::SummaryStatistics;

/// Number of values generated per built-in population.
pub const DEFAULT_POPULATION_SIZE: usize = 1000;

/// How to build one named population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationDef {
    pub name: String,
    pub recipe: Recipe,
    #[serde(default = "PopulationDef::default_size")]
    pub size: usize,
}

impl PopulationDef {
    fn default_size() -> usize {
        DEFAULT_POPULATION_SIZE
    }

    pub fn new(name: impl Into<String>, recipe: Recipe, size: usize) -> Self {
        Self {
            name: name.into(),
            recipe,
            size,
        }
    }
}

/// An immutable, generated population.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    name: String,
    values: Arc<[f64]>,
    version: u64,
}

impl Population {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// A shared handle to the values; survives later regeneration.
    pub fn shared_values(&self) -> Arc<[f64]> {
        Arc::clone(&self.values)
    }

    /// Starts at 0 and increases by one on every regeneration.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn summary(&self) -> Result<SummaryStatistics> {
        SummaryStatistics::from_data(&self.values)
    }
}

impl AsRef<[f64]> for Population {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// The 16 teaching datasets, each with `size` values.
pub fn builtin_defs(size: usize) -> Vec<PopulationDef> {
    use SkewShape::*;

    let normal = |name: &str, mean: f64, std_dev: f64| {
        PopulationDef::new(name, Recipe::Normal { mean, std_dev }, size)
    };
    let skewed = |name: &str, shape: SkewShape, location: f64, scale: f64| {
        PopulationDef::new(
            name,
            Recipe::Skewed {
                shape,
                location,
                scale,
            },
            size,
        )
    };

    vec![
        normal("weights", 70.0, 10.0),
        normal("house_prices", 150_000.0, 25_000.0),
        normal("exam_scores", 80.0, 10.0),
        normal("heights", 165.0, 10.0),
        normal("salaries", 50_000.0, 15_000.0),
        normal("ages", 35.0, 10.0),
        skewed("household_incomes", LowSkewCubic, 20_000.0, 50_000.0),
        skewed("property_values", HighSkewCubicInverted, 200_000.0, 50_000.0),
        skewed("city_population_growth", QuadraticGrowth, 0.0, 50.0),
        skewed("company_profits", QuadraticConcentration, 0.0, 100_000.0),
        skewed("rainfall_levels", LowSkewCubic, 10.0, 40.0),
        normal("running_speeds", 15.0, 2.5),
        normal("blood_pressure", 120.0, 15.0),
        skewed("air_quality_index", QuadraticGrowth, 0.0, 300.0),
        skewed("sales_figures", QuadraticConcentration, 10_000.0, 20_000.0),
        normal("reaction_times", 0.5, 0.1),
    ]
}

/// Generated populations, in definition order.
#[derive(Debug, Clone)]
pub struct Catalog {
    defs: Vec<PopulationDef>,
    populations: Vec<Population>,
}

impl Catalog {
    /// Generates every definition once.
    ///
    /// # Errors
    /// [`StatsError::InvalidParameters`] on an empty definition list, a
    /// zero size, or a duplicate name.
    pub fn generate<S: UniformSource + ?Sized>(
        defs: Vec<PopulationDef>,
        source: &mut S,
    ) -> Result<Self> {
        if defs.is_empty() {
            return Err(StatsError::InvalidParameters(
                "a catalog needs at least one population".into(),
            ));
        }
        for (i, def) in defs.iter().enumerate() {
            if def.size == 0 {
                return Err(StatsError::InvalidParameters(format!(
                    "population {:?} has size 0",
                    def.name
                )));
            }
            if defs[..i].iter().any(|d| d.name == def.name) {
                return Err(StatsError::InvalidParameters(format!(
                    "duplicate population name {:?}",
                    def.name
                )));
            }
        }

        let populations = defs
            .iter()
            .map(|def| Self::materialize(def, 0, source))
            .collect();
        Ok(Self { defs, populations })
    }

    /// [`builtin_defs`] generated with `source`.
    pub fn builtin<S: UniformSource + ?Sized>(size: usize, source: &mut S) -> Result<Self> {
        Self::generate(builtin_defs(size), source)
    }

    fn materialize<S: UniformSource + ?Sized>(
        def: &PopulationDef,
        version: u64,
        source: &mut S,
    ) -> Population {
        let values: Arc<[f64]> = def.recipe.generate(def.size, source).into();
        debug!(name = %def.name, size = def.size, version, "generated population");
        Population {
            name: def.name.clone(),
            values,
            version,
        }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.defs
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| StatsError::UnknownPopulation(name.to_string()))
    }

    /// Looks up a population by name.
    ///
    /// # Errors
    /// [`StatsError::UnknownPopulation`] if no such name exists.
    pub fn get(&self, name: &str) -> Result<&Population> {
        Ok(&self.populations[self.position(name)?])
    }

    pub fn def(&self, name: &str) -> Result<&PopulationDef> {
        Ok(&self.defs[self.position(name)?])
    }

    /// Names in definition order.
    pub fn names(&self) -> Vec<&str> {
        self.defs.iter().map(|d| d.name.as_str()).collect()
    }

    /// Names in a random order, for presenting datasets unlabeled by kind.
    pub fn shuffled_names<S: UniformSource + ?Sized>(&self, source: &mut S) -> Vec<&str> {
        let mut names = self.names();
        shuffle(&mut names, source);
        names
    }

    /// Replaces a population's values with a fresh draw.
    ///
    /// # Errors
    /// [`StatsError::UnknownPopulation`] if no such name exists.
    pub fn regenerate<S: UniformSource + ?Sized>(
        &mut self,
        name: &str,
        source: &mut S,
    ) -> Result<&Population> {
        let idx = self.position(name)?;
        let version = self.populations[idx].version + 1;
        self.populations[idx] = Self::materialize(&self.defs[idx], version, source);
        Ok(&self.populations[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Population> {
        self.populations.iter()
    }

    pub fn len(&self) -> usize {
        self.populations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.populations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::stats;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builtin_has_sixteen_named_populations() {
        let catalog = Catalog::builtin(200, &mut create_rng(1)).unwrap();
        assert_eq!(catalog.len(), 16);
        assert_eq!(catalog.names()[0], "weights");
        assert_eq!(catalog.names()[15], "reaction_times");
        assert!(catalog.iter().all(|p| p.len() == 200 && p.version() == 0));
    }

    #[test]
    fn test_builtin_ranges() {
        let catalog = Catalog::builtin(DEFAULT_POPULATION_SIZE, &mut create_rng(3)).unwrap();
        let incomes = catalog.get("household_incomes").unwrap().values();
        assert!(incomes.iter().all(|&x| (20_000.0..=70_000.0).contains(&x)));
        let property = catalog.get("property_values").unwrap().values();
        assert!(property.iter().all(|&x| (150_000.0..=200_000.0).contains(&x)));
        let aqi = catalog.get("air_quality_index").unwrap().values();
        assert!(aqi.iter().all(|&x| (0.0..=300.0).contains(&x)));
    }

    #[test]
    fn test_builtin_means_match_recipes() {
        let catalog = Catalog::builtin(20_000, &mut create_rng(8)).unwrap();
        let heights = stats::mean(catalog.get("heights").unwrap().values()).unwrap();
        assert_abs_diff_eq!(heights, 165.0, epsilon = 0.5);
        let rainfall = stats::mean(catalog.get("rainfall_levels").unwrap().values()).unwrap();
        assert_abs_diff_eq!(rainfall, 20.0, epsilon = 0.5);
    }

    #[test]
    fn test_unknown_population() {
        let catalog = Catalog::builtin(10, &mut create_rng(1)).unwrap();
        assert_eq!(
            catalog.get("unicorns"),
            Err(StatsError::UnknownPopulation("unicorns".into()))
        );
    }

    #[test]
    fn test_generate_rejects_bad_defs() {
        let mut rng = create_rng(1);
        let recipe = Recipe::Normal {
            mean: 0.0,
            std_dev: 1.0,
        };
        assert!(Catalog::generate(vec![], &mut rng).is_err());
        assert!(Catalog::generate(vec![PopulationDef::new("a", recipe, 0)], &mut rng).is_err());
        let dup = vec![
            PopulationDef::new("a", recipe, 5),
            PopulationDef::new("a", recipe, 5),
        ];
        assert!(matches!(
            Catalog::generate(dup, &mut rng),
            Err(StatsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_regenerate_is_copy_on_write() {
        let mut rng = create_rng(21);
        let mut catalog = Catalog::builtin(50, &mut rng).unwrap();
        let snapshot = catalog.get("ages").unwrap().shared_values();
        let before: Vec<f64> = snapshot.to_vec();

        let regenerated = catalog.regenerate("ages", &mut rng).unwrap();
        assert_eq!(regenerated.version(), 1);
        assert_ne!(regenerated.values(), &before[..]);
        assert_eq!(&snapshot[..], &before[..]);

        assert_eq!(catalog.get("weights").unwrap().version(), 0);
        assert!(catalog.regenerate("nope", &mut rng).is_err());
    }

    #[test]
    fn test_shuffled_names_is_permutation() {
        let catalog = Catalog::builtin(5, &mut create_rng(1)).unwrap();
        let mut shuffled = catalog.shuffled_names(&mut create_rng(99));
        let mut names = catalog.names();
        assert_eq!(shuffled.len(), names.len());
        shuffled.sort_unstable();
        names.sort_unstable();
        assert_eq!(shuffled, names);
    }

    #[test]
    fn test_def_roundtrips_through_toml() {
        let text = r#"
name = "commute_minutes"
size = 500

[recipe]
kind = "normal"
mean = 25.0
std_dev = 8.0
"#;
        let def: PopulationDef = toml::from_str(text).unwrap();
        assert_eq!(def.size, 500);
        assert_eq!(def.recipe.expected_mean(), 25.0);

        let no_size: PopulationDef =
            toml::from_str("name = \"x\"\n[recipe]\nkind = \"normal\"\nmean = 0.0\nstd_dev = 1.0\n")
                .unwrap();
        assert_eq!(no_size.size, DEFAULT_POPULATION_SIZE);
    }
}
