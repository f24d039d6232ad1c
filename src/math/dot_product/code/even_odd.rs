//! Two-way interleaved dot product.
//!
//! Even and odd indices go to separate accumulators, halving the length of
//! the serial add chain. Only even lengths are accepted.

use crate::error::KernelError;

/// Dot product over element pairs with two independent accumulators.
///
/// # Errors
/// [`KernelError::OddLength`] if the length is odd.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_even_odd(a: &[f64], b: &[f64]) -> Result<f64, KernelError> {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    if a.len() % 2 != 0 {
        return Err(KernelError::OddLength { len: a.len() });
    }

    let mut sum0 = 0.0;
    let mut sum1 = 0.0;
    for (pa, pb) in a.chunks_exact(2).zip(b.chunks_exact(2)) {
        sum0 += pa[0] * pb[0];
        sum1 += pa[1] * pb[1];
    }

    Ok(sum0 + sum1)
}
