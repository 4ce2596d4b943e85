//! Weighting/transform layer.
//!
//! Outcome and vertical weighting evaluate a [`WeightFn`] into per-vector
//! [`Weights`](escore_core::Weights); threshold weighting maps the input
//! through a [`TransformFn`] and scores the result unweighted.

pub mod builtins;
pub mod transform_fn;
pub mod weight_fn;

pub use transform_fn::{TransformFn, TransformFnPtr};
pub use weight_fn::{WeightFn, WeightFnPtr};

impl WeightFn {
    pub fn ones() -> Self {
        Self::new(builtins::ones, Vec::new())
    }

    pub fn all_above(threshold: f64) -> Self {
        Self::new(builtins::all_above, [threshold])
    }

    pub fn all_below(threshold: f64) -> Self {
        Self::new(builtins::all_below, [threshold])
    }

    pub fn any_above(threshold: f64) -> Self {
        Self::new(builtins::any_above, [threshold])
    }
}

impl Default for WeightFn {
    fn default() -> Self {
        Self::ones()
    }
}

impl TransformFn {
    pub fn identity() -> Self {
        Self::new(builtins::identity, Vec::new())
    }

    pub fn max_with(threshold: f64) -> Self {
        Self::new(builtins::max_with, [threshold])
    }

    pub fn min_with(threshold: f64) -> Self {
        Self::new(builtins::min_with, [threshold])
    }
}

impl Default for TransformFn {
    fn default() -> Self {
        Self::identity()
    }
}
