use serde::{Deserialize, Serialize};

use super::defaults;

/// Execution settings for the compiled and traced backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Maximum number of compiled kernels kept in the cache.
    pub cache_capacity: u64,
    /// Batch size at which instances are spread across the rayon pool.
    /// 0 means always parallel.
    pub parallel_batch_threshold: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            cache_capacity: defaults::DEFAULT_KERNEL_CACHE_CAPACITY,
            parallel_batch_threshold: defaults::DEFAULT_PARALLEL_BATCH_THRESHOLD,
        }
    }
}

impl KernelConfig {
    /// Whether a batch of `batch` instances should run on the rayon pool.
    pub fn runs_parallel(&self, batch: usize) -> bool {
        batch > 1 && batch >= self.parallel_batch_threshold
    }
}
