//! Dot product through the pool's built-in parallel sum reduction.

use super::lanes::dot_lanes;
use rayon::prelude::*;
use rayon::ThreadPool;

/// Contiguous block size for the vectorized reduction
const LANE_BLOCK: usize = 256;

/// Dot product as a parallel `map` + `sum`.
///
/// # Panics
/// Panics if the vectors have different lengths.
#[inline(never)]
pub fn dot_product_reduction(pool: &ThreadPool, a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    pool.install(|| {
        a.par_iter()
            .zip(b.par_iter())
            .map(|(x, y)| x * y)
            .sum::<f64>()
    })
}

/// Parallel reduction over lane-accumulated blocks.
#[inline(never)]
pub fn dot_product_reduction_simd(pool: &ThreadPool, a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    pool.install(|| {
        a.par_chunks(LANE_BLOCK)
            .zip(b.par_chunks(LANE_BLOCK))
            .map(|(xa, xb)| dot_lanes(xa, xb))
            .sum::<f64>()
    })
}
