//! # escore-engine
//!
//! Weighted energy scores for ensemble forecasts.
//!
//! ```no_run
//! use escore_engine::{outcome_weighted_energy_score, WeightFn};
//! use ndarray::array;
//!
//! let forecasts = array![[0.8, 0.02], [0.48, 0.76], [0.22, 0.32]];
//! let observation = array![0.27, 0.81];
//! let weight = WeightFn::all_above(0.2);
//! let scores = outcome_weighted_energy_score(
//!     forecasts.view(),
//!     observation.view(),
//!     Some(&weight),
//!     "compiled",
//! )?;
//! assert_eq!(scores.len(), 1);
//! # Ok::<(), escore_core::EscoreError>(())
//! ```

pub mod api;
pub mod engine;
pub mod registry;
pub mod weighting;

pub use api::{
    default_engine, energy_score, outcome_weighted_energy_score, threshold_weighted_energy_score,
    vertically_rescaled_energy_score,
};
pub use engine::{ScoreGradients, ScoreRequest, ScoringEngine};
pub use registry::BackendRegistry;
pub use weighting::{TransformFn, WeightFn};
