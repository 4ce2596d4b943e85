//! Free-function entry points on a process-wide default engine.
//!
//! Forecasts and observations may be any of the ranks accepted by
//! [`ScoreInput::from_dyn`]; each call validates and lifts them before
//! scoring.

use std::sync::OnceLock;

use escore_core::errors::EscoreResult;
use escore_core::models::ScoreInput;
use ndarray::{Array1, ArrayView, Dimension};

use crate::engine::ScoringEngine;
use crate::weighting::{TransformFn, WeightFn};

static DEFAULT_ENGINE: OnceLock<ScoringEngine> = OnceLock::new();

/// The shared engine behind the free functions, built from default config
/// on first use.
pub fn default_engine() -> &'static ScoringEngine {
    DEFAULT_ENGINE.get_or_init(ScoringEngine::default)
}

fn prepare<D1: Dimension, D2: Dimension>(
    forecasts: ArrayView<'_, f64, D1>,
    observations: ArrayView<'_, f64, D2>,
) -> EscoreResult<ScoreInput> {
    ScoreInput::from_dyn(forecasts.into_dyn(), observations.into_dyn())
}

/// Energy score of each instance.
pub fn energy_score<D1: Dimension, D2: Dimension>(
    forecasts: ArrayView<'_, f64, D1>,
    observations: ArrayView<'_, f64, D2>,
    backend: &str,
) -> EscoreResult<Array1<f64>> {
    let input = prepare(forecasts, observations)?;
    default_engine().energy_score(&input, backend)
}

/// Outcome-weighted energy score of each instance.
pub fn outcome_weighted_energy_score<D1: Dimension, D2: Dimension>(
    forecasts: ArrayView<'_, f64, D1>,
    observations: ArrayView<'_, f64, D2>,
    weight_fn: Option<&WeightFn>,
    backend: &str,
) -> EscoreResult<Array1<f64>> {
    let input = prepare(forecasts, observations)?;
    default_engine().outcome_weighted_energy_score(&input, weight_fn, backend)
}

/// Threshold-weighted energy score of each instance.
pub fn threshold_weighted_energy_score<D1: Dimension, D2: Dimension>(
    forecasts: ArrayView<'_, f64, D1>,
    observations: ArrayView<'_, f64, D2>,
    transform_fn: Option<&TransformFn>,
    backend: &str,
) -> EscoreResult<Array1<f64>> {
    let input = prepare(forecasts, observations)?;
    default_engine().threshold_weighted_energy_score(&input, transform_fn, backend)
}

/// Vertically-rescaled energy score of each instance.
pub fn vertically_rescaled_energy_score<D1: Dimension, D2: Dimension>(
    forecasts: ArrayView<'_, f64, D1>,
    observations: ArrayView<'_, f64, D2>,
    weight_fn: Option<&WeightFn>,
    backend: &str,
) -> EscoreResult<Array1<f64>> {
    let input = prepare(forecasts, observations)?;
    default_engine().vertically_rescaled_energy_score(&input, weight_fn, backend)
}
