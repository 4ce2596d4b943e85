//! # escore-core
//!
//! Foundation crate for the escore workspace.
//! Defines the score input model, the backend trait, errors, config, tracing
//! setup, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod observability;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EscoreConfig;
pub use errors::{EscoreError, EscoreResult};
pub use models::{BackendKind, ScoreInput, ScoreShape, ScoreVariant, Weights};
pub use traits::IScoreBackend;
