/// escore version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Relative tolerance within which every backend must agree on identical inputs.
pub const BACKEND_AGREEMENT_RTOL: f64 = 1e-10;

/// Environment variable read by `init_tracing` for the log filter.
pub const LOG_ENV_VAR: &str = "ESCORE_LOG";

/// Reference point x₀ for the vertically-rescaled correction norms.
pub const ZERO_REFERENCE: f64 = 0.0;
