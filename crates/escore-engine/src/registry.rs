//! Backend adapter: maps identifiers to backend instances.

use escore_core::config::KernelConfig;
use escore_core::errors::EscoreResult;
use escore_core::models::BackendKind;
use escore_core::traits::IScoreBackend;
use escore_kernels::{CompiledBackend, ReferenceBackend, TracedBackend};

/// One instance of every backend, created up front.
pub struct BackendRegistry {
    reference: ReferenceBackend,
    compiled: CompiledBackend,
    traced: TracedBackend,
}

impl BackendRegistry {
    pub fn new(config: &KernelConfig) -> Self {
        Self {
            reference: ReferenceBackend::new(),
            compiled: CompiledBackend::new(config.clone()),
            traced: TracedBackend::new(config.clone()),
        }
    }

    pub fn get(&self, kind: BackendKind) -> &dyn IScoreBackend {
        match kind {
            BackendKind::Ndarray => &self.reference,
            BackendKind::Compiled => &self.compiled,
            BackendKind::Traced => &self.traced,
        }
    }

    /// Look up a backend by identifier.
    ///
    /// # Errors
    /// `BackendError::Unsupported`, listing the accepted identifiers.
    pub fn resolve(&self, name: &str) -> EscoreResult<&dyn IScoreBackend> {
        let kind: BackendKind = name.parse()?;
        Ok(self.get(kind))
    }

    pub fn compiled(&self) -> &CompiledBackend {
        &self.compiled
    }

    pub fn traced(&self) -> &TracedBackend {
        &self.traced
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new(&KernelConfig::default())
    }
}
