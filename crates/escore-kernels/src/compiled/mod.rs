//! Compiled backend: memoized loop kernels.
//!
//! The first call for a (variant, shape) signature compiles a
//! [`CompiledKernel`]; later calls reuse it from the [`KernelCache`].

pub mod cache;
pub mod kernel;

use std::sync::Arc;

use escore_core::config::KernelConfig;
use escore_core::errors::EscoreResult;
use escore_core::models::{BackendKind, ScoreInput, ScoreVariant, Weights};
use escore_core::traits::IScoreBackend;
use ndarray::Array1;

pub use cache::{KernelCache, KernelCacheStats};
pub use kernel::{CompiledKernel, KernelKey};

/// Compiled-kernel evaluator.
pub struct CompiledBackend {
    cache: KernelCache,
    config: KernelConfig,
}

impl CompiledBackend {
    pub fn new(config: KernelConfig) -> Self {
        Self {
            cache: KernelCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn cache_stats(&self) -> KernelCacheStats {
        self.cache.stats()
    }

    /// Drop all compiled kernels.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn kernel(&self, variant: ScoreVariant, input: &ScoreInput) -> Arc<CompiledKernel> {
        let key = KernelKey {
            variant,
            shape: input.shape(),
        };
        self.cache
            .get_or_compile(key, || CompiledKernel::compile(key, &self.config))
    }
}

impl Default for CompiledBackend {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

impl IScoreBackend for CompiledBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Compiled
    }

    fn energy(&self, input: &ScoreInput) -> EscoreResult<Array1<f64>> {
        Ok(self.kernel(ScoreVariant::Energy, input).run(input, None))
    }

    fn outcome_weighted(
        &self,
        input: &ScoreInput,
        weights: &Weights,
    ) -> EscoreResult<Array1<f64>> {
        weights.check_shape(&input.shape())?;
        Ok(self
            .kernel(ScoreVariant::OutcomeWeighted, input)
            .run(input, Some(weights)))
    }

    fn vertically_rescaled(
        &self,
        input: &ScoreInput,
        weights: &Weights,
    ) -> EscoreResult<Array1<f64>> {
        weights.check_shape(&input.shape())?;
        Ok(self
            .kernel(ScoreVariant::VerticallyRescaled, input)
            .run(input, Some(weights)))
    }
}
