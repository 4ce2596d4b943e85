use ndarray::{Array1, Array2, Array3, ArrayView1, Axis};

use escore_core::errors::{EscoreResult, ShapeError};
use escore_core::models::ScoreInput;

/// Signature of a threshold transform: a vector plus parameters, giving a
/// vector of the same length.
pub type TransformFnPtr = fn(ArrayView1<'_, f64>, &[f64]) -> Array1<f64>;

/// A transform bound to its parameters.
#[derive(Debug, Clone)]
pub struct TransformFn {
    func: TransformFnPtr,
    args: Vec<f64>,
}

impl TransformFn {
    pub fn new(func: TransformFnPtr, args: impl Into<Vec<f64>>) -> Self {
        Self {
            func,
            args: args.into(),
        }
    }

    pub fn args(&self) -> &[f64] {
        &self.args
    }

    /// v(x, *args), checked to keep the vector length.
    pub fn transform(&self, v: ArrayView1<'_, f64>) -> EscoreResult<Array1<f64>> {
        let out = (self.func)(v, &self.args);
        if out.len() != v.len() {
            return Err(ShapeError::TransformLength {
                expected: v.len(),
                actual: out.len(),
            }
            .into());
        }
        Ok(out)
    }

    /// Transform every member and every observation of `input`.
    ///
    /// # Errors
    /// `ShapeError::TransformLength` if any output changes length.
    pub fn apply(&self, input: &ScoreInput) -> EscoreResult<ScoreInput> {
        let source = input.forecasts();
        let mut forecasts = Array3::zeros(source.raw_dim());
        for (mut dst, src) in forecasts
            .lanes_mut(Axis(2))
            .into_iter()
            .zip(source.lanes(Axis(2)))
        {
            dst.assign(&self.transform(src)?);
        }

        let source = input.observations();
        let mut observations = Array2::zeros(source.raw_dim());
        for (mut dst, src) in observations.outer_iter_mut().zip(source.outer_iter()) {
            dst.assign(&self.transform(src)?);
        }

        ScoreInput::new(forecasts.view(), observations.view())
    }
}
