//! Kernel families and the shared execution context they run in.

pub mod block_dot;
pub mod dot_product;

use crate::config::{RunConfig, MAX_WORKERS};
use crate::error::BenchError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Parameters shared by every kernel variant of a run.
///
/// The worker pool backs the scheduler-chunked and reduction kernels; the
/// static-stride kernels spawn their own scoped threads per call.
#[derive(Clone)]
pub struct KernelContext {
    /// Runtime unroll factor for the `unroll_runtime` variant
    pub unroll_factor: usize,
    /// Number of parallel workers
    pub workers: usize,
    pool: Arc<ThreadPool>,
}

impl KernelContext {
    /// Build a context with a pool of `workers` threads, clamped to `1..=MAX_WORKERS`.
    pub fn new(unroll_factor: usize, workers: usize) -> Result<Self, BenchError> {
        let workers = workers.clamp(1, MAX_WORKERS);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("dot-worker-{}", i))
            .build()?;
        log::debug!("worker pool ready with {} threads", workers);

        Ok(Self {
            unroll_factor,
            workers,
            pool: Arc::new(pool),
        })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self, BenchError> {
        Self::new(config.unroll_factor, config.workers)
    }

    pub fn pool(&self) -> &Arc<ThreadPool> {
        &self.pool
    }
}

impl std::fmt::Debug for KernelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelContext")
            .field("unroll_factor", &self.unroll_factor)
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}
