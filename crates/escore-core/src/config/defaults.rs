// Single source of truth for all default values.

use crate::models::BackendKind;

// --- Backends ---
pub const DEFAULT_BACKEND: BackendKind = BackendKind::Ndarray;

// --- Kernels ---
pub const DEFAULT_KERNEL_CACHE_CAPACITY: u64 = 256;
pub const DEFAULT_PARALLEL_BATCH_THRESHOLD: usize = 64;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
