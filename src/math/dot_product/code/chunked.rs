//! Dot product with scheduler-assigned contiguous chunks.
//!
//! The pool's work-stealing scheduler decides which worker takes which
//! chunk. Every split gets a private accumulator (`fold`); the partials are
//! collected and folded sequentially once the parallel region has finished.

use super::lanes::{dot_lanes, LANES};
use rayon::prelude::*;
use rayon::ThreadPool;

/// Chunks handed out per worker, so idle workers can steal
const CHUNKS_PER_WORKER: usize = 4;

fn min_chunk(len: usize, workers: usize) -> usize {
    (len / (workers.max(1) * CHUNKS_PER_WORKER)).max(1)
}

/// Dot product over scheduler-assigned chunks.
///
/// # Panics
/// Panics if the vectors have different lengths.
#[inline(never)]
pub fn dot_product_chunked(pool: &ThreadPool, a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    let min_len = min_chunk(a.len(), pool.current_num_threads());

    let partials: Vec<f64> = pool.install(|| {
        a.par_iter()
            .zip(b.par_iter())
            .with_min_len(min_len)
            .fold(|| 0.0f64, |acc, (x, y)| acc + x * y)
            .collect()
    });

    partials.iter().sum()
}

/// Like [`dot_product_chunked`], with lane accumulators inside each chunk.
#[inline(never)]
pub fn dot_product_chunked_simd(pool: &ThreadPool, a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    let chunk = min_chunk(a.len(), pool.current_num_threads()).next_multiple_of(LANES);

    let partials: Vec<f64> = pool.install(|| {
        a.par_chunks(chunk)
            .zip(b.par_chunks(chunk))
            .map(|(xa, xb)| dot_lanes(xa, xb))
            .collect()
    });

    partials.iter().sum()
}
