use super::error_code::{self, EscoreErrorCode};

/// Backend selection errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("unsupported backend '{name}': expected one of {supported}")]
    Unsupported { name: String, supported: String },
}

impl EscoreErrorCode for BackendError {
    fn error_code(&self) -> &'static str {
        error_code::UNSUPPORTED_BACKEND
    }
}
