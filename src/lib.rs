//! # dot-bench
//!
//! Dot product and 8x4 block dot product kernels, each in several
//! unrolled, vectorized and multi-threaded variants, timed with a cycle
//! counter and validated against a sequential reference.

pub mod config;
pub mod error;
pub mod math;
pub mod registry;
pub mod utils;

/// Re-export tui from utils
pub use utils::tui;

/// Re-export the driver entry points
pub use utils::runner::{list_variants, run_benchmarks, verify_all};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{Oracle, RunConfig};
    pub use crate::error::{BenchError, KernelError};
    pub use crate::math::block_dot::{BlockOperands, Traversal};
    pub use crate::math::dot_product;
    pub use crate::math::KernelContext;
    pub use crate::registry::{build_registry, BenchmarkRegistry, BenchmarkRunner};
}
