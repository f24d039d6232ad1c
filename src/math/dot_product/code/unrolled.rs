//! Partial-sum unrolling.
//!
//! The loop is split into blocks of `m` elements; element `j` of every block
//! feeds accumulator `j`, so consecutive multiply-adds no longer depend on
//! each other. The `m` partial sums are reduced once at the end.
//!
//! Both kernels require `m` to divide the vector length. There is no tail
//! loop: a length that does not divide evenly is a configuration error.

use crate::error::KernelError;

/// Unroll factor of the compile-time variant
pub const COMPILE_TIME_FACTOR: usize = 4;

fn check_factor(len: usize, factor: usize) -> Result<(), KernelError> {
    if factor == 0 {
        return Err(KernelError::ZeroUnrollFactor);
    }
    if len % factor != 0 {
        return Err(KernelError::IndivisibleLength { len, factor });
    }
    Ok(())
}

/// Dot product with a runtime unroll factor `m`.
///
/// # Errors
/// [`KernelError::ZeroUnrollFactor`] if `m == 0`,
/// [`KernelError::IndivisibleLength`] if `m` does not divide the length.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_unrolled(a: &[f64], b: &[f64], m: usize) -> Result<f64, KernelError> {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    check_factor(a.len(), m)?;
    if a.is_empty() {
        return Ok(0.0);
    }

    // m <= len from here on
    let mut sums = vec![0.0f64; m];
    for (block_a, block_b) in a.chunks_exact(m).zip(b.chunks_exact(m)) {
        for ((sum, x), y) in sums.iter_mut().zip(block_a).zip(block_b) {
            *sum += x * y;
        }
    }

    Ok(sums.iter().sum())
}

/// Dot product with the unroll factor fixed at compile time.
///
/// Same contract as [`dot_product_unrolled`]; the accumulators live in a
/// fixed-size array so the inner loop can be fully unrolled.
pub fn dot_product_unrolled_const<const M: usize>(
    a: &[f64],
    b: &[f64],
) -> Result<f64, KernelError> {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    check_factor(a.len(), M)?;

    let mut sums = [0.0f64; M];
    for (block_a, block_b) in a.chunks_exact(M).zip(b.chunks_exact(M)) {
        for j in 0..M {
            sums[j] += block_a[j] * block_b[j];
        }
    }

    Ok(sums.iter().sum())
}
