use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BackendError;

/// Runtime discriminator for the execution strategy behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Reference evaluator built from ndarray broadcasting expressions.
    Ndarray,
    /// Loop kernels specialised per (variant, shape) and memoized.
    Compiled,
    /// Reverse-mode tape; the only backend that yields gradients.
    Traced,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Ndarray,
        BackendKind::Compiled,
        BackendKind::Traced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Ndarray => "ndarray",
            BackendKind::Compiled => "compiled",
            BackendKind::Traced => "traced",
        }
    }

    /// Comma-separated list of every accepted identifier.
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(BackendKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ndarray" => Ok(BackendKind::Ndarray),
            "compiled" => Ok(BackendKind::Compiled),
            "traced" => Ok(BackendKind::Traced),
            _ => Err(BackendError::Unsupported {
                name: s.to_string(),
                supported: Self::supported(),
            }),
        }
    }
}
