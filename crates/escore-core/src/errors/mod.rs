//! Error types for the escore workspace.
//!
//! One `thiserror` enum per concern, wrapped by [`EscoreError`].

pub mod backend_error;
pub mod config_error;
pub mod error_code;
pub mod shape_error;

pub use backend_error::BackendError;
pub use config_error::ConfigError;
pub use error_code::EscoreErrorCode;
pub use shape_error::ShapeError;

/// Top-level error for every fallible escore operation.
#[derive(Debug, thiserror::Error)]
pub enum EscoreError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias used across the workspace.
pub type EscoreResult<T> = Result<T, EscoreError>;

impl EscoreErrorCode for EscoreError {
    fn error_code(&self) -> &'static str {
        match self {
            EscoreError::Shape(e) => e.error_code(),
            EscoreError::Backend(e) => e.error_code(),
            EscoreError::Config(e) => e.error_code(),
        }
    }
}
