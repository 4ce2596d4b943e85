//! Tracing setup and span definitions.
//! `tracing` with `EnvFilter`; per-module log levels through `ESCORE_LOG`.

pub mod setup;
pub mod spans;

pub use setup::{init_tracing, init_tracing_with_config};
