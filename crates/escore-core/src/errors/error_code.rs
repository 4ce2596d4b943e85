//! Stable error codes for callers that match on strings (bindings, logs).

/// Every escore error enum maps to a stable code string.
pub trait EscoreErrorCode {
    /// Returns the error code (e.g., "SHAPE_MISMATCH").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
pub const UNSUPPORTED_BACKEND: &str = "UNSUPPORTED_BACKEND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
