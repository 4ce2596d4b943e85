//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize tracing with default settings.
///
/// Reads `ESCORE_LOG` for the filter, e.g. `ESCORE_LOG=escore_kernels=debug`.
/// Falls back to `info` when unset or invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_config(&ObservabilityConfig::default());
}

/// Initialize tracing from an `ObservabilityConfig`.
///
/// `ESCORE_LOG` still wins over `config.log_level` when set.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

        let registry = tracing_subscriber::registry().with(filter);
        let installed = if config.json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
        // Another subscriber (e.g. a host application's) already owns the
        // global default.
        if installed.is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
