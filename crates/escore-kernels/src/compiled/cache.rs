//! Compiled-kernel cache using moka.
//!
//! `get_with` coalesces concurrent misses on the same key into a single
//! initialisation, so a kernel is compiled at most once per residency even
//! when many threads ask for it first at the same time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;

use super::kernel::{CompiledKernel, KernelKey};

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelCacheStats {
    /// Misses that ran the compiler.
    pub compilations: u64,
    /// Kernel requests.
    pub lookups: u64,
    /// Kernels currently resident.
    pub entries: u64,
}

/// Memoized kernels keyed by (variant, shape).
pub struct KernelCache {
    cache: Cache<KernelKey, Arc<CompiledKernel>>,
    compilations: AtomicU64,
    lookups: AtomicU64,
}

impl KernelCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
            compilations: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
        }
    }

    /// Return the kernel for `key`, running `compile` only on a miss.
    pub fn get_or_compile(
        &self,
        key: KernelKey,
        compile: impl FnOnce() -> CompiledKernel,
    ) -> Arc<CompiledKernel> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.cache.get_with(key, || {
            self.compilations.fetch_add(1, Ordering::Relaxed);
            Arc::new(compile())
        })
    }

    pub fn stats(&self) -> KernelCacheStats {
        self.cache.run_pending_tasks();
        KernelCacheStats {
            compilations: self.compilations.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }

    /// Drop every resident kernel. Counters are kept.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
