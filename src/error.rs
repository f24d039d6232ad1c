//! Error types for kernels and the benchmark driver.

use thiserror::Error;

/// A kernel refused its input instead of computing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("unroll factor {factor} does not divide vector length {len}")]
    IndivisibleLength { len: usize, factor: usize },

    #[error("unroll factor must be at least 1")]
    ZeroUnrollFactor,

    #[error("even/odd kernel requires an even length, got {len}")]
    OddLength { len: usize },
}

/// Failures of the driver itself.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("no runner registered for {mode} mode")]
    MissingRunner { mode: &'static str },
}
