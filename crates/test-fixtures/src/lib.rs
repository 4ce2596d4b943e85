//! Test fixture loader for escore golden datasets, plus seeded random
//! ensembles for tests and benchmarks.

use std::path::PathBuf;

use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// `golden/weighted_scenarios.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioSet {
    pub rtol: f64,
    pub scenarios: Vec<Scenario>,
}

/// One forecast/observation pair and the scores expected for it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Members × variables.
    pub forecasts: Vec<Vec<f64>>,
    pub observation: Vec<f64>,
    pub cases: Vec<ScenarioCase>,
}

/// Expected score for a variant with a named builtin weight or transform.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioCase {
    pub variant: String,
    pub function: String,
    pub args: Vec<f64>,
    pub expected: f64,
}

impl Scenario {
    /// Forecasts as a (1, members, variables) batch.
    pub fn forecast_array(&self) -> Array3<f64> {
        let members = self.forecasts.len();
        let variables = self.observation.len();
        Array3::from_shape_fn((1, members, variables), |(_, m, d)| self.forecasts[m][d])
    }

    /// Observation as a (1, variables) batch.
    pub fn observation_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, self.observation.len()), |(_, d)| self.observation[d])
    }
}

/// Load the golden weighted-score scenarios.
pub fn weighted_scenarios() -> ScenarioSet {
    load_fixture("golden/weighted_scenarios.json")
}

/// Seeded ensemble with values uniform in [-2, 2): forecasts
/// (batch, members, variables) and observations (batch, variables).
pub fn random_ensemble(
    seed: u64,
    batch: usize,
    members: usize,
    variables: usize,
) -> (Array3<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let forecasts =
        Array3::from_shape_simple_fn((batch, members, variables), || rng.random_range(-2.0..2.0));
    let observations =
        Array2::from_shape_simple_fn((batch, variables), || rng.random_range(-2.0..2.0));
    (forecasts, observations)
}
