//! Workspace configuration, loadable from TOML.
//!
//! ```toml
//! default_backend = "compiled"
//!
//! [kernels]
//! cache_capacity = 128
//! parallel_batch_threshold = 32
//!
//! [observability]
//! log_level = "debug"
//! ```

pub mod defaults;
pub mod kernel_config;
pub mod observability_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, EscoreResult};
use crate::models::BackendKind;

pub use kernel_config::KernelConfig;
pub use observability_config::ObservabilityConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level escore configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscoreConfig {
    /// Backend used by `ScoringEngine::score_default`.
    pub default_backend: BackendKind,
    pub kernels: KernelConfig,
    pub observability: ObservabilityConfig,
}

impl Default for EscoreConfig {
    fn default() -> Self {
        Self {
            default_backend: defaults::DEFAULT_BACKEND,
            kernels: KernelConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl EscoreConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> EscoreResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> EscoreResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: display.clone(),
                }
            } else {
                ConfigError::ReadFailed {
                    path: display.clone(),
                    message: e.to_string(),
                }
            }
        })?;
        Self::parse(&content, &display)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> EscoreResult<()> {
        if self.kernels.cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "kernels.cache_capacity".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "'{}' is not one of {}",
                    self.observability.log_level,
                    LOG_LEVELS.join(", ")
                ),
            }
            .into());
        }
        Ok(())
    }

    fn parse(content: &str, path: &str) -> EscoreResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
