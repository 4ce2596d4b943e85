use super::error_code::{self, EscoreErrorCode};

/// Forecast/observation/weight shapes that cannot be scored together.
///
/// Raised before any computation starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("batch dimension mismatch: forecasts have {forecasts} instances, observations have {observations}")]
    BatchMismatch { forecasts: usize, observations: usize },

    #[error("variable dimension mismatch: forecasts have {forecasts} variables, observations have {observations}")]
    VariableMismatch { forecasts: usize, observations: usize },

    #[error("ensemble must contain at least one member")]
    EmptyEnsemble,

    #[error("instances must have at least one variable")]
    EmptyVariables,

    #[error("unsupported ranks: {forecasts}-D forecasts with {observations}-D observations")]
    UnsupportedRank { forecasts: usize, observations: usize },

    #[error("transform returned {actual} values for a {expected}-variable vector")]
    TransformLength { expected: usize, actual: usize },

    #[error("weights shaped {actual:?} do not match (batch, members) = {expected:?}")]
    WeightShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl EscoreErrorCode for ShapeError {
    fn error_code(&self) -> &'static str {
        error_code::SHAPE_MISMATCH
    }
}
