//! Validated forecast/observation pair.
//!
//! Trailing axes are (members, variables) for forecasts and (variables) for
//! observations. Lower-rank inputs are lifted to the full
//! (batch, members, variables) / (batch, variables) layout at construction.

use ndarray::{Array2, Array3, ArrayView1, ArrayView2, ArrayView3, ArrayViewD, Axis};
use serde::{Deserialize, Serialize};

use crate::errors::{EscoreResult, ShapeError};

/// Shape signature of a scoring call. Part of the compiled-kernel cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreShape {
    pub batch: usize,
    pub members: usize,
    pub variables: usize,
}

/// Forecast ensemble and observations, owned and never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInput {
    forecasts: Array3<f64>,
    observations: Array2<f64>,
}

impl ScoreInput {
    /// Build from (batch, members, variables) forecasts and
    /// (batch, variables) observations.
    ///
    /// # Errors
    /// Returns a `ShapeError` when batch or variable dimensions disagree, the
    /// ensemble is empty, or there are no variables.
    pub fn new(
        forecasts: ArrayView3<'_, f64>,
        observations: ArrayView2<'_, f64>,
    ) -> EscoreResult<Self> {
        let (batch, members, variables) = forecasts.dim();
        let (obs_batch, obs_variables) = observations.dim();

        if batch != obs_batch {
            return Err(ShapeError::BatchMismatch {
                forecasts: batch,
                observations: obs_batch,
            }
            .into());
        }
        if variables != obs_variables {
            return Err(ShapeError::VariableMismatch {
                forecasts: variables,
                observations: obs_variables,
            }
            .into());
        }
        if members == 0 {
            return Err(ShapeError::EmptyEnsemble.into());
        }
        if variables == 0 {
            return Err(ShapeError::EmptyVariables.into());
        }

        Ok(Self {
            forecasts: forecasts.as_standard_layout().into_owned(),
            observations: observations.as_standard_layout().into_owned(),
        })
    }

    /// Build from a batch of univariate instances: (batch, members) forecasts
    /// and (batch,) observations.
    pub fn univariate(
        forecasts: ArrayView2<'_, f64>,
        observations: ArrayView1<'_, f64>,
    ) -> EscoreResult<Self> {
        Self::new(forecasts.insert_axis(Axis(2)), observations.insert_axis(Axis(1)))
    }

    /// Build from arrays of any supported rank.
    ///
    /// | forecasts | observations | read as |
    /// |-----------|--------------|---------|
    /// | (B, M, D) | (B, D) | batch of multivariate instances |
    /// | (M, D) | (D,) | one multivariate instance |
    /// | (M,) | () or (1,) | one univariate instance |
    ///
    /// A 2-D forecast is always one multivariate instance; an observation
    /// whose length differs from D is a `VariableMismatch`. Batches of
    /// univariate instances go through [`ScoreInput::univariate`].
    pub fn from_dyn(
        forecasts: ArrayViewD<'_, f64>,
        observations: ArrayViewD<'_, f64>,
    ) -> EscoreResult<Self> {
        let f = forecasts.shape();
        let o = observations.shape();

        let (forecast_dims, observation_dims) = match (f.len(), o.len()) {
            (3, 2) => ((f[0], f[1], f[2]), (o[0], o[1])),
            (2, 1) => ((1, f[0], f[1]), (1, o[0])),
            (1, 0) => ((1, f[0], 1), (1, 1)),
            (1, 1) => ((1, f[0], 1), (1, o[0])),
            (forecast_rank, observation_rank) => {
                return Err(ShapeError::UnsupportedRank {
                    forecasts: forecast_rank,
                    observations: observation_rank,
                }
                .into())
            }
        };

        // Row-major iteration order matches the lifted layout, so the
        // element count always agrees with the target dims.
        let unsupported = || ShapeError::UnsupportedRank {
            forecasts: f.len(),
            observations: o.len(),
        };
        let forecasts = Array3::from_shape_vec(forecast_dims, forecasts.iter().copied().collect())
            .map_err(|_| unsupported())?;
        let observations =
            Array2::from_shape_vec(observation_dims, observations.iter().copied().collect())
                .map_err(|_| unsupported())?;

        Self::new(forecasts.view(), observations.view())
    }

    pub fn shape(&self) -> ScoreShape {
        let (batch, members, variables) = self.forecasts.dim();
        ScoreShape {
            batch,
            members,
            variables,
        }
    }

    /// (batch, members, variables) view of the ensemble.
    pub fn forecasts(&self) -> ArrayView3<'_, f64> {
        self.forecasts.view()
    }

    /// (batch, variables) view of the observations.
    pub fn observations(&self) -> ArrayView2<'_, f64> {
        self.observations.view()
    }

    /// Members and observation of one instance.
    pub fn instance(&self, index: usize) -> (ArrayView2<'_, f64>, ArrayView1<'_, f64>) {
        (
            self.forecasts.index_axis(Axis(0), index),
            self.observations.index_axis(Axis(0), index),
        )
    }
}
