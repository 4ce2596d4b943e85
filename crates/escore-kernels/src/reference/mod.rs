//! Reference backend: whole-batch ndarray expressions.
//!
//! Materialises the (B, M) error and (B, M, M) spread matrices with the
//! broadcasting helpers from [`crate::distance`] and reduces them along the
//! member axes. Simple and memory-hungry; the other backends are checked
//! against it.

use escore_core::errors::EscoreResult;
use escore_core::models::{BackendKind, ScoreInput, Weights};
use escore_core::traits::IScoreBackend;
use ndarray::{Array1, Axis, Zip};

use crate::distance;

/// Reduced sums for a batch.
struct Terms {
    /// Σᵢ wᵢ·w_y·‖xᵢ − y‖
    accuracy: Array1<f64>,
    /// Σᵢ Σⱼ wᵢ·wⱼ·‖xᵢ − xⱼ‖, self-pairs included.
    spread: Array1<f64>,
}

/// Array-expression evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    pub fn new() -> Self {
        Self
    }

    fn terms(input: &ScoreInput, weights: Option<&Weights>) -> Terms {
        let errors = distance::member_errors(input.forecasts(), input.observations());
        let spreads = distance::member_spreads(input.forecasts());

        match weights {
            None => Terms {
                accuracy: errors.sum_axis(Axis(1)),
                spread: spreads.sum_axis(Axis(2)).sum_axis(Axis(1)),
            },
            Some(w) => {
                let members = w.members();
                let observed = w.observation().insert_axis(Axis(1));
                let pair_weights = &members.insert_axis(Axis(2)) * &members.insert_axis(Axis(1));
                Terms {
                    accuracy: (errors * &members * &observed).sum_axis(Axis(1)),
                    spread: (spreads * &pair_weights).sum_axis(Axis(2)).sum_axis(Axis(1)),
                }
            }
        }
    }
}

impl IScoreBackend for ReferenceBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Ndarray
    }

    fn energy(&self, input: &ScoreInput) -> EscoreResult<Array1<f64>> {
        let m = input.shape().members as f64;
        let terms = Self::terms(input, None);
        Ok(terms.accuracy / m - terms.spread / (2.0 * m * m))
    }

    fn outcome_weighted(
        &self,
        input: &ScoreInput,
        weights: &Weights,
    ) -> EscoreResult<Array1<f64>> {
        weights.check_shape(&input.shape())?;
        let terms = Self::terms(input, Some(weights));
        let weight_sums = weights.members().sum_axis(Axis(1));

        Ok(Zip::from(&terms.accuracy)
            .and(&terms.spread)
            .and(&weight_sums)
            .and(&weights.observation())
            .map_collect(|&accuracy, &spread, &weight_sum, &observed| {
                let accuracy_norm = weight_sum * observed;
                let spread_norm = weight_sum * weight_sum;
                if accuracy_norm == 0.0 || spread_norm == 0.0 {
                    f64::NAN
                } else {
                    accuracy / accuracy_norm - 0.5 * spread / spread_norm
                }
            }))
    }

    fn vertically_rescaled(
        &self,
        input: &ScoreInput,
        weights: &Weights,
    ) -> EscoreResult<Array1<f64>> {
        weights.check_shape(&input.shape())?;
        let m = input.shape().members as f64;
        let terms = Self::terms(input, Some(weights));

        let members = weights.members();
        let observed = weights.observation();
        let mean_weight = members.sum_axis(Axis(1)) / m;
        let mean_weighted_norm =
            (distance::member_norms(input.forecasts()) * &members).sum_axis(Axis(1)) / m;
        let observed_norm = distance::observation_norms(input.observations()) * &observed;
        let correction = (mean_weight - &observed) * (mean_weighted_norm - observed_norm);

        Ok(terms.accuracy / m - terms.spread / (2.0 * m * m) + correction)
    }
}
