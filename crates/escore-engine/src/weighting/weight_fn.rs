use ndarray::{Array1, Array2, ArrayView1, Axis};

use escore_core::models::{ScoreInput, Weights};

/// Signature of an outcome weight: a vector plus parameters, giving a
/// scalar in [0, 1].
pub type WeightFnPtr = fn(ArrayView1<'_, f64>, &[f64]) -> f64;

/// A weight function bound to its parameters.
#[derive(Debug, Clone)]
pub struct WeightFn {
    func: WeightFnPtr,
    args: Vec<f64>,
}

impl WeightFn {
    pub fn new(func: WeightFnPtr, args: impl Into<Vec<f64>>) -> Self {
        Self {
            func,
            args: args.into(),
        }
    }

    pub fn args(&self) -> &[f64] {
        &self.args
    }

    /// w(v, *args).
    pub fn weight(&self, v: ArrayView1<'_, f64>) -> f64 {
        (self.func)(v, &self.args)
    }

    /// Weigh every member and every observation of `input`.
    pub fn evaluate(&self, input: &ScoreInput) -> Weights {
        let shape = input.shape();
        let forecasts = input.forecasts();
        let members = Array2::from_shape_fn((shape.batch, shape.members), |(b, m)| {
            self.weight(forecasts.index_axis(Axis(0), b).index_axis_move(Axis(0), m))
        });
        let observation: Array1<f64> = input
            .observations()
            .outer_iter()
            .map(|y| self.weight(y))
            .collect();
        Weights::new(members, observation)
    }
}
