use escore_core::errors::error_code;
use escore_core::errors::{BackendError, EscoreError, EscoreErrorCode, ShapeError};

#[test]
fn shape_errors_carry_shape_code() {
    let err: EscoreError = ShapeError::BatchMismatch {
        forecasts: 10,
        observations: 9,
    }
    .into();
    assert_eq!(err.error_code(), error_code::SHAPE_MISMATCH);
    assert_eq!(
        err.coded_string(),
        "[SHAPE_MISMATCH] batch dimension mismatch: forecasts have 10 instances, observations have 9"
    );
}

#[test]
fn backend_errors_carry_backend_code() {
    let err: EscoreError = BackendError::Unsupported {
        name: "gpu".to_string(),
        supported: "ndarray, compiled, traced".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::UNSUPPORTED_BACKEND);
    assert!(err.to_string().starts_with("unsupported backend 'gpu'"));
}

#[test]
fn transform_length_message() {
    let err = ShapeError::TransformLength {
        expected: 3,
        actual: 2,
    };
    assert_eq!(
        err.to_string(),
        "transform returned 2 values for a 3-variable vector"
    );
}
