//! # escore-kernels
//!
//! The Distance Engine and three independent implementations of
//! [`IScoreBackend`](escore_core::IScoreBackend).
//!
//! | Backend | Strategy |
//! |---------|----------|
//! | [`ReferenceBackend`] | ndarray broadcasting expressions over the whole batch |
//! | [`CompiledBackend`] | loop kernels specialised per (variant, shape), memoized, rayon over the batch |
//! | [`TracedBackend`] | one reverse-mode tape per instance; scores plus gradients |
//!
//! All three agree to within `BACKEND_AGREEMENT_RTOL` on identical inputs.

pub mod compiled;
pub mod distance;
mod layout;
pub mod reference;
pub mod traced;

pub use compiled::{CompiledBackend, KernelCacheStats};
pub use reference::ReferenceBackend;
pub use traced::{TracedBackend, TracedScores};
