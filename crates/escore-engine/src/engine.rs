//! ScoringEngine: the single entry point for every score variant.
//!
//! Resolves the backend, runs the weighting/transform layer, and hands the
//! prepared input to the backend.

use escore_core::config::EscoreConfig;
use escore_core::errors::EscoreResult;
use escore_core::models::{ScoreInput, ScoreVariant, Weights};
use escore_core::score_span;
use escore_kernels::KernelCacheStats;
use ndarray::{Array1, Array2, Array3};

use crate::registry::BackendRegistry;
use crate::weighting::{TransformFn, WeightFn};

/// A variant together with its weight function or transform.
#[derive(Debug, Clone)]
pub enum ScoreRequest {
    Energy,
    OutcomeWeighted(WeightFn),
    ThresholdWeighted(TransformFn),
    VerticallyRescaled(WeightFn),
}

impl ScoreRequest {
    pub fn variant(&self) -> ScoreVariant {
        match self {
            ScoreRequest::Energy => ScoreVariant::Energy,
            ScoreRequest::OutcomeWeighted(_) => ScoreVariant::OutcomeWeighted,
            ScoreRequest::ThresholdWeighted(_) => ScoreVariant::ThresholdWeighted,
            ScoreRequest::VerticallyRescaled(_) => ScoreVariant::VerticallyRescaled,
        }
    }
}

/// Scores and their derivatives with respect to the (transformed) inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGradients {
    pub scores: Array1<f64>,
    /// (batch, members, variables).
    pub forecasts: Array3<f64>,
    /// (batch, variables).
    pub observations: Array2<f64>,
}

/// Energy score family over a registry of backends.
pub struct ScoringEngine {
    config: EscoreConfig,
    registry: BackendRegistry,
}

impl ScoringEngine {
    /// Build an engine from a validated config.
    pub fn new(config: EscoreConfig) -> EscoreResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: EscoreConfig) -> Self {
        let registry = BackendRegistry::new(&config.kernels);
        Self { config, registry }
    }

    pub fn config(&self) -> &EscoreConfig {
        &self.config
    }

    /// Identifier of the configured default backend.
    pub fn default_backend(&self) -> &'static str {
        self.config.default_backend.as_str()
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn kernel_cache_stats(&self) -> KernelCacheStats {
        self.registry.compiled().cache_stats()
    }

    /// Baseline energy score, one value per instance.
    pub fn energy_score(&self, input: &ScoreInput, backend: &str) -> EscoreResult<Array1<f64>> {
        self.score(&ScoreRequest::Energy, input, backend)
    }

    /// Outcome-weighted energy score. `None` means constant weight 1.
    pub fn outcome_weighted_energy_score(
        &self,
        input: &ScoreInput,
        weight_fn: Option<&WeightFn>,
        backend: &str,
    ) -> EscoreResult<Array1<f64>> {
        let request = ScoreRequest::OutcomeWeighted(weight_fn.cloned().unwrap_or_default());
        self.score(&request, input, backend)
    }

    /// Threshold-weighted energy score. `None` means the identity transform.
    pub fn threshold_weighted_energy_score(
        &self,
        input: &ScoreInput,
        transform_fn: Option<&TransformFn>,
        backend: &str,
    ) -> EscoreResult<Array1<f64>> {
        let request = ScoreRequest::ThresholdWeighted(transform_fn.cloned().unwrap_or_default());
        self.score(&request, input, backend)
    }

    /// Vertically-rescaled energy score. `None` means constant weight 1.
    pub fn vertically_rescaled_energy_score(
        &self,
        input: &ScoreInput,
        weight_fn: Option<&WeightFn>,
        backend: &str,
    ) -> EscoreResult<Array1<f64>> {
        let request = ScoreRequest::VerticallyRescaled(weight_fn.cloned().unwrap_or_default());
        self.score(&request, input, backend)
    }

    /// Evaluate `request` on the backend named `backend`.
    pub fn score(
        &self,
        request: &ScoreRequest,
        input: &ScoreInput,
        backend: &str,
    ) -> EscoreResult<Array1<f64>> {
        let scorer = self.registry.resolve(backend)?;
        let shape = input.shape();
        let _span = score_span!(request.variant(), scorer.kind(), shape.batch).entered();
        tracing::debug!(
            members = shape.members,
            variables = shape.variables,
            "scoring"
        );

        let scores = match request {
            ScoreRequest::Energy => scorer.energy(input)?,
            ScoreRequest::OutcomeWeighted(weight_fn) => {
                scorer.outcome_weighted(input, &weight_fn.evaluate(input))?
            }
            ScoreRequest::ThresholdWeighted(transform_fn) => {
                scorer.energy(&transform_fn.apply(input)?)?
            }
            ScoreRequest::VerticallyRescaled(weight_fn) => {
                scorer.vertically_rescaled(input, &weight_fn.evaluate(input))?
            }
        };

        warn_degenerate(request.variant(), &scores);
        Ok(scores)
    }

    /// Evaluate `request` on the configured `default_backend`.
    pub fn score_default(
        &self,
        request: &ScoreRequest,
        input: &ScoreInput,
    ) -> EscoreResult<Array1<f64>> {
        self.score(request, input, self.default_backend())
    }

    /// Scores with gradients, always on the traced backend.
    ///
    /// Threshold transforms are applied first, so gradients are with respect
    /// to the transformed values. Weights are held constant.
    pub fn gradients(
        &self,
        request: &ScoreRequest,
        input: &ScoreInput,
    ) -> EscoreResult<ScoreGradients> {
        let traced = self.registry.traced();
        let variant = request.variant();
        let _span = score_span!(variant, "traced", input.shape().batch).entered();

        let transformed;
        let weights: Option<Weights>;
        let input = match request {
            ScoreRequest::Energy => {
                weights = None;
                input
            }
            ScoreRequest::ThresholdWeighted(transform_fn) => {
                transformed = transform_fn.apply(input)?;
                weights = None;
                &transformed
            }
            ScoreRequest::OutcomeWeighted(weight_fn)
            | ScoreRequest::VerticallyRescaled(weight_fn) => {
                weights = Some(weight_fn.evaluate(input));
                input
            }
        };

        let out = traced.score_with_gradients(variant, input, weights.as_ref())?;
        warn_degenerate(variant, &out.scores);
        Ok(ScoreGradients {
            scores: out.scores,
            forecasts: out.forecast_gradients,
            observations: out.observation_gradients,
        })
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::from_valid(EscoreConfig::default())
    }
}

fn warn_degenerate(variant: ScoreVariant, scores: &Array1<f64>) {
    if !variant.is_weighted() {
        return;
    }
    let degenerate = scores.iter().filter(|s| s.is_nan()).count();
    if degenerate > 0 {
        tracing::warn!(
            %variant,
            degenerate,
            batch = scores.len(),
            "instances without weighted support scored NaN"
        );
    }
}
