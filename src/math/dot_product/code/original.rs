//! Reference implementation of the dot product.
//!
//! A single running sum, accumulated in index order. Every other variant is
//! checked against this one.

/// Compute the dot product of two vectors.
///
/// # Panics
/// Panics if the vectors have different lengths.
///
/// # Example
/// ```
/// use dot_bench::math::dot_product::dot_product_reference;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// assert_eq!(dot_product_reference(&a, &b), 32.0);
/// ```
#[inline(never)]
pub fn dot_product_reference(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}
