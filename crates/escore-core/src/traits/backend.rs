use ndarray::Array1;

use crate::errors::EscoreResult;
use crate::models::{BackendKind, ScoreInput, Weights};

/// One execution strategy for the energy score family.
///
/// Implementations are independent of each other but must agree to within
/// `BACKEND_AGREEMENT_RTOL` on identical inputs. Threshold weighting has no
/// method of its own: it is `energy` on transformed input.
pub trait IScoreBackend: Send + Sync {
    /// Discriminator used by the registry.
    fn kind(&self) -> BackendKind;

    /// Baseline energy score, one value per instance.
    fn energy(&self, input: &ScoreInput) -> EscoreResult<Array1<f64>>;

    /// Outcome-weighted energy score. An instance whose weight products sum
    /// to zero scores NaN.
    fn outcome_weighted(&self, input: &ScoreInput, weights: &Weights)
        -> EscoreResult<Array1<f64>>;

    /// Vertically-rescaled energy score.
    fn vertically_rescaled(
        &self,
        input: &ScoreInput,
        weights: &Weights,
    ) -> EscoreResult<Array1<f64>>;
}
