//! Loop kernels specialised for one (variant, shape) signature.
//!
//! "Compiling" a kernel fixes everything that depends only on the signature:
//! the unrolled distance function for the variable count, the strictly
//! upper-triangular member pair list, and whether the batch is split across
//! the rayon pool. Running it walks each instance once in row-major order.

use escore_core::config::KernelConfig;
use escore_core::kernel_span;
use escore_core::models::{ScoreInput, ScoreShape, ScoreVariant, Weights};
use ndarray::Array1;
use rayon::prelude::*;

use crate::distance::{self, DistanceFn};
use crate::layout::contiguous;

/// Cache key: one kernel per score variant and input shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelKey {
    pub variant: ScoreVariant,
    pub shape: ScoreShape,
}

/// A kernel ready to run against any input of its shape.
#[derive(Debug)]
pub struct CompiledKernel {
    key: KernelKey,
    distance: DistanceFn,
    pairs: Vec<(usize, usize)>,
    parallel: bool,
}

impl CompiledKernel {
    /// Specialise a kernel for `key`.
    pub fn compile(key: KernelKey, config: &KernelConfig) -> Self {
        let _span = kernel_span!(key.variant, key.shape.members, key.shape.variables).entered();

        let members = key.shape.members;
        let pairs: Vec<(usize, usize)> = (0..members)
            .flat_map(|i| (i + 1..members).map(move |j| (i, j)))
            .collect();
        let parallel = config.runs_parallel(key.shape.batch);

        tracing::debug!(
            pairs = pairs.len(),
            parallel,
            batch = key.shape.batch,
            "compiled kernel"
        );

        Self {
            key,
            distance: distance::select_distance_fn(key.shape.variables),
            pairs,
            parallel,
        }
    }

    pub fn key(&self) -> KernelKey {
        self.key
    }

    /// Score every instance of `input`. `weights` must already match the
    /// input shape; `None` means unit weights.
    pub fn run(&self, input: &ScoreInput, weights: Option<&Weights>) -> Array1<f64> {
        let ScoreShape {
            batch,
            members,
            variables,
        } = self.key.shape;
        let forecasts = contiguous(input.forecasts());
        let observations = contiguous(input.observations());
        let member_weights = weights.map(|w| contiguous(w.members()));
        let observed_weights = weights.map(|w| contiguous(w.observation()));

        let stride = members * variables;
        let score = |b: usize| {
            let xs = &forecasts[b * stride..(b + 1) * stride];
            let y = &observations[b * variables..(b + 1) * variables];
            let wx = member_weights
                .as_deref()
                .map(|w| &w[b * members..(b + 1) * members]);
            let wy = observed_weights.as_deref().map_or(1.0, |w| w[b]);
            self.score_instance(xs, y, wx, wy)
        };

        let scores: Vec<f64> = if self.parallel {
            (0..batch).into_par_iter().map(|b| score(b)).collect()
        } else {
            (0..batch).map(|b| score(b)).collect()
        };
        Array1::from(scores)
    }

    fn score_instance(&self, xs: &[f64], y: &[f64], wx: Option<&[f64]>, wy: f64) -> f64 {
        let d = self.key.shape.variables;
        let m = self.key.shape.members as f64;
        let member = move |i: usize| &xs[i * d..(i + 1) * d];
        let weight = move |i: usize| wx.map_or(1.0, |w| w[i]);
        let rescaled = self.key.variant == ScoreVariant::VerticallyRescaled;

        let mut accuracy = 0.0;
        let mut weight_sum = 0.0;
        let mut weighted_norm = 0.0;
        for i in 0..self.key.shape.members {
            let wi = weight(i);
            accuracy += wi * (self.distance)(member(i), y);
            weight_sum += wi;
            if rescaled {
                weighted_norm += wi * distance::norm(member(i));
            }
        }
        accuracy *= wy;

        // Self-pairs are zero; every off-diagonal pair appears twice.
        let mut spread = 0.0;
        for &(i, j) in &self.pairs {
            spread += weight(i) * weight(j) * (self.distance)(member(i), member(j));
        }
        spread *= 2.0;

        match self.key.variant {
            ScoreVariant::Energy | ScoreVariant::ThresholdWeighted => {
                accuracy / m - spread / (2.0 * m * m)
            }
            ScoreVariant::OutcomeWeighted => {
                let accuracy_norm = weight_sum * wy;
                let spread_norm = weight_sum * weight_sum;
                if accuracy_norm == 0.0 || spread_norm == 0.0 {
                    f64::NAN
                } else {
                    accuracy / accuracy_norm - 0.5 * spread / spread_norm
                }
            }
            ScoreVariant::VerticallyRescaled => {
                let correction =
                    (weight_sum / m - wy) * (weighted_norm / m - wy * distance::norm(y));
                accuracy / m - spread / (2.0 * m * m) + correction
            }
        }
    }
}
