//! Span definitions per operation: scoring, kernel compilation, tape tracing.
//!
//! Each span carries the variant, backend, and shape fields via `tracing`.

/// Create a span around one scoring call.
#[macro_export]
macro_rules! score_span {
    ($variant:expr, $backend:expr, $batch:expr) => {
        ::tracing::debug_span!(
            "escore.score",
            variant = %$variant,
            backend = %$backend,
            batch = $batch
        )
    };
}

/// Create a span around one kernel compilation.
#[macro_export]
macro_rules! kernel_span {
    ($variant:expr, $members:expr, $variables:expr) => {
        ::tracing::debug_span!(
            "escore.kernel",
            variant = %$variant,
            members = $members,
            variables = $variables
        )
    };
}

/// Create a span around recording and replaying a tape.
#[macro_export]
macro_rules! tape_span {
    ($variant:expr, $batch:expr) => {
        ::tracing::debug_span!("escore.tape", variant = %$variant, batch = $batch)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SCORE: &str = "escore.score";
    pub const KERNEL: &str = "escore.kernel";
    pub const TAPE: &str = "escore.tape";
}
