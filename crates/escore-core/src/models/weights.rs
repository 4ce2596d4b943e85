use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::score_input::ScoreShape;
use crate::errors::ShapeError;

/// Per-vector weights for one scoring call: w(xᵢ) for every member of every
/// instance and w(y) for every observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    members: Array2<f64>,
    observation: Array1<f64>,
}

impl Weights {
    /// `members` is (batch, members), `observation` is (batch,).
    pub fn new(members: Array2<f64>, observation: Array1<f64>) -> Self {
        Self {
            members,
            observation,
        }
    }

    /// Unit weights; every weighted variant reduces to the energy score.
    pub fn ones(shape: ScoreShape) -> Self {
        Self {
            members: Array2::ones((shape.batch, shape.members)),
            observation: Array1::ones(shape.batch),
        }
    }

    pub fn members(&self) -> ArrayView2<'_, f64> {
        self.members.view()
    }

    pub fn observation(&self) -> ArrayView1<'_, f64> {
        self.observation.view()
    }

    /// Check that the weights line up with an input of shape `shape`.
    pub fn check_shape(&self, shape: &ScoreShape) -> Result<(), ShapeError> {
        let expected = (shape.batch, shape.members);
        if self.members.dim() != expected || self.observation.len() != shape.batch {
            return Err(ShapeError::WeightShape {
                expected,
                actual: self.members.dim(),
            });
        }
        Ok(())
    }
}
