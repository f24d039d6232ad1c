//! Thread-partitioned dot product with static stride assignment.
//!
//! Worker `t` of `W` owns indices `t, t + W, t + 2W, ...` and writes only its
//! own accumulator slot. The slots are summed in worker order after every
//! worker has joined.

use super::lanes::dot_strided_lanes;
use std::thread;

type PartialFn = fn(&[f64], &[f64], usize, usize) -> f64;

fn strided_partial(a: &[f64], b: &[f64], start: usize, stride: usize) -> f64 {
    a.iter()
        .zip(b)
        .skip(start)
        .step_by(stride)
        .fold(0.0, |acc, (x, y)| acc + x * y)
}

fn run_strided(a: &[f64], b: &[f64], workers: usize, partial: PartialFn) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    // No worker without an element to own
    let workers = workers.clamp(1, a.len().max(1));

    let mut sums = vec![0.0f64; workers];
    thread::scope(|s| {
        for (id, slot) in sums.iter_mut().enumerate() {
            s.spawn(move || {
                *slot = partial(a, b, id, workers);
            });
        }
    });

    sums.iter().sum()
}

/// Dot product split across `workers` scoped threads by fixed stride.
///
/// # Panics
/// Panics if the vectors have different lengths.
#[inline(never)]
pub fn dot_product_strided(a: &[f64], b: &[f64], workers: usize) -> f64 {
    run_strided(a, b, workers, strided_partial)
}

/// Like [`dot_product_strided`], with lane accumulators inside each worker.
#[inline(never)]
pub fn dot_product_strided_simd(a: &[f64], b: &[f64], workers: usize) -> f64 {
    run_strided(a, b, workers, dot_strided_lanes)
}
