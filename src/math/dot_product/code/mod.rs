//! Dot product implementations.
//!
//! This module contains all implementation variants of the dot product and
//! the registry order in which the driver runs them.

mod chunked;
mod even_odd;
pub mod lanes;
mod original;
mod reduction;
mod strided;
mod unrolled;

pub use chunked::{dot_product_chunked, dot_product_chunked_simd};
pub use even_odd::dot_product_even_odd;
pub use original::dot_product_reference;
pub use reduction::{dot_product_reduction, dot_product_reduction_simd};
pub use strided::{dot_product_strided, dot_product_strided_simd};
pub use unrolled::{dot_product_unrolled, dot_product_unrolled_const, COMPILE_TIME_FACTOR};

use crate::error::KernelError;
use crate::math::KernelContext;
use crate::utils::VariantInfo;
use std::sync::Arc;

/// A dot product kernel with its run parameters already bound.
pub type DotKernel = Arc<dyn Fn(&[f64], &[f64]) -> Result<f64, KernelError> + Send + Sync>;

/// Name of the reference variant
pub const REFERENCE_VARIANT: &str = "reference";

/// Name of the variant bound to the runtime unroll factor
pub const RUNTIME_UNROLL_VARIANT: &str = "unroll_runtime";

fn variant<F>(
    name: &'static str,
    description: &'static str,
    parallel: bool,
    function: F,
) -> VariantInfo<DotKernel>
where
    F: Fn(&[f64], &[f64]) -> Result<f64, KernelError> + Send + Sync + 'static,
{
    let function: DotKernel = Arc::new(function);
    VariantInfo {
        name,
        description,
        parallel,
        function,
    }
}

/// Get all variants, in the order the driver runs them.
pub fn available_variants(ctx: &KernelContext) -> Vec<VariantInfo<DotKernel>> {
    let workers = ctx.workers;
    let unroll_factor = ctx.unroll_factor;
    let pool = Arc::clone(ctx.pool());
    let pool_chunked = Arc::clone(&pool);
    let pool_reduction = Arc::clone(&pool);
    let pool_chunked_simd = Arc::clone(&pool);
    let pool_reduction_simd = pool;

    vec![
        variant(
            REFERENCE_VARIANT,
            "Sequential accumulation into one running sum",
            false,
            |a, b| Ok(dot_product_reference(a, b)),
        ),
        variant(
            "strided",
            "Scoped threads, static stride, private accumulator slots",
            true,
            move |a, b| Ok(dot_product_strided(a, b, workers)),
        ),
        variant(
            "chunked",
            "Scheduler-assigned contiguous chunks, per-split accumulators",
            true,
            move |a, b| Ok(dot_product_chunked(&pool_chunked, a, b)),
        ),
        variant(
            "reduction",
            "Parallel map + sum reduction",
            true,
            move |a, b| Ok(dot_product_reduction(&pool_reduction, a, b)),
        ),
        variant(
            "even_odd",
            "Two interleaved accumulators (even lengths only)",
            false,
            |a, b| dot_product_even_odd(a, b),
        ),
        variant(
            "unroll_const",
            "Partial sums, unroll factor fixed at compile time",
            false,
            |a, b| dot_product_unrolled_const::<COMPILE_TIME_FACTOR>(a, b),
        ),
        variant(
            RUNTIME_UNROLL_VARIANT,
            "Partial sums, unroll factor chosen at runtime",
            false,
            move |a, b| dot_product_unrolled(a, b, unroll_factor),
        ),
        variant(
            "strided_simd",
            "Static stride with lane accumulators per worker",
            true,
            move |a, b| Ok(dot_product_strided_simd(a, b, workers)),
        ),
        variant(
            "chunked_simd",
            "Scheduler-assigned chunks with lane accumulators",
            true,
            move |a, b| Ok(dot_product_chunked_simd(&pool_chunked_simd, a, b)),
        ),
        variant(
            "reduction_simd",
            "Parallel sum over lane-accumulated blocks",
            true,
            move |a, b| Ok(dot_product_reduction_simd(&pool_reduction_simd, a, b)),
        ),
    ]
}

/// Look up a single variant by name.
pub fn find_variant(ctx: &KernelContext, name: &str) -> Option<VariantInfo<DotKernel>> {
    available_variants(ctx).into_iter().find(|v| v.name == name)
}
