use escore_core::config::{defaults, EscoreConfig};
use escore_core::errors::{ConfigError, EscoreError};
use escore_core::BackendKind;

#[test]
fn empty_document_yields_defaults() {
    let config = EscoreConfig::from_toml_str("").unwrap();
    assert_eq!(config, EscoreConfig::default());
    assert_eq!(config.default_backend, defaults::DEFAULT_BACKEND);
    assert_eq!(
        config.kernels.cache_capacity,
        defaults::DEFAULT_KERNEL_CACHE_CAPACITY
    );
}

#[test]
fn partial_document_overrides_only_named_keys() {
    let config = EscoreConfig::from_toml_str(
        r#"
        default_backend = "compiled"

        [kernels]
        parallel_batch_threshold = 8
        "#,
    )
    .unwrap();
    assert_eq!(config.default_backend, BackendKind::Compiled);
    assert_eq!(config.kernels.parallel_batch_threshold, 8);
    assert_eq!(
        config.kernels.cache_capacity,
        defaults::DEFAULT_KERNEL_CACHE_CAPACITY
    );
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn unknown_backend_is_a_parse_error() {
    let err = EscoreConfig::from_toml_str(r#"default_backend = "gpu""#).unwrap_err();
    assert!(matches!(
        err,
        EscoreError::Config(ConfigError::ParseError { .. })
    ));
}

#[test]
fn zero_cache_capacity_rejected() {
    let err = EscoreConfig::from_toml_str("[kernels]\ncache_capacity = 0").unwrap_err();
    match err {
        EscoreError::Config(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "kernels.cache_capacity");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bad_log_level_rejected() {
    let err = EscoreConfig::from_toml_str("[observability]\nlog_level = \"loud\"").unwrap_err();
    assert!(err.to_string().contains("observability.log_level"));
}

#[test]
fn missing_file_reported_with_path() {
    let err = EscoreConfig::load("/definitely/not/here/escore.toml").unwrap_err();
    match err {
        EscoreError::Config(ConfigError::FileNotFound { path }) => {
            assert!(path.ends_with("escore.toml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn parallel_threshold_gate() {
    let config = EscoreConfig::from_toml_str("[kernels]\nparallel_batch_threshold = 4").unwrap();
    assert!(!config.kernels.runs_parallel(1));
    assert!(!config.kernels.runs_parallel(3));
    assert!(config.kernels.runs_parallel(4));
}
