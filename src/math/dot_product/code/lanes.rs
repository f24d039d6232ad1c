//! Lane-accumulated inner loops used by the vectorized variants.
//!
//! Four independent accumulators per call. On x86_64 the contiguous loop
//! uses SSE2 (two `f64` per register, two registers); elsewhere a portable
//! loop the compiler can vectorize.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Number of independent accumulators
pub const LANES: usize = 4;

/// Dot product of two contiguous slices with [`LANES`] accumulators.
///
/// # Panics
/// Panics if the slices have different lengths.
pub fn dot_lanes(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    #[cfg(target_arch = "x86_64")]
    {
        dot_lanes_sse2(a, b)
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        dot_lanes_portable(a, b)
    }
}

/// Portable lane loop.
pub fn dot_lanes_portable(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let chunks_a = a.chunks_exact(LANES);
    let chunks_b = b.chunks_exact(LANES);
    let tail: f64 = chunks_a
        .remainder()
        .iter()
        .zip(chunks_b.remainder())
        .map(|(x, y)| x * y)
        .sum();

    let mut acc = [0.0f64; LANES];
    for (xa, xb) in chunks_a.zip(chunks_b) {
        for lane in 0..LANES {
            acc[lane] += xa[lane] * xb[lane];
        }
    }

    (acc[0] + acc[1]) + (acc[2] + acc[3]) + tail
}

#[cfg(target_arch = "x86_64")]
fn dot_lanes_sse2(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let chunks = len / LANES;

    // SAFETY: SSE2 is part of the x86_64 baseline and every load reads
    // indices below `chunks * LANES <= len`.
    let mut result = unsafe {
        let mut lo = _mm_setzero_pd();
        let mut hi = _mm_setzero_pd();

        for i in 0..chunks {
            let idx = i * LANES;
            let a_lo = _mm_loadu_pd(a.as_ptr().add(idx));
            let b_lo = _mm_loadu_pd(b.as_ptr().add(idx));
            let a_hi = _mm_loadu_pd(a.as_ptr().add(idx + 2));
            let b_hi = _mm_loadu_pd(b.as_ptr().add(idx + 2));
            lo = _mm_add_pd(lo, _mm_mul_pd(a_lo, b_lo));
            hi = _mm_add_pd(hi, _mm_mul_pd(a_hi, b_hi));
        }

        let sum = _mm_add_pd(lo, hi);
        let mut out = [0.0f64; 2];
        _mm_storeu_pd(out.as_mut_ptr(), sum);
        out[0] + out[1]
    };

    for i in chunks * LANES..len {
        result += a[i] * b[i];
    }

    result
}

/// Lane loop over the indices `start, start + stride, start + 2 * stride, ...`.
///
/// # Panics
/// Panics if `stride == 0` or the slices have different lengths.
pub fn dot_strided_lanes(a: &[f64], b: &[f64], start: usize, stride: usize) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    assert!(stride > 0, "stride must be positive");

    let n = a.len();
    let mut acc = [0.0f64; LANES];
    let mut i = start;

    while i + (LANES - 1) * stride < n {
        acc[0] += a[i] * b[i];
        acc[1] += a[i + stride] * b[i + stride];
        acc[2] += a[i + 2 * stride] * b[i + 2 * stride];
        acc[3] += a[i + 3 * stride] * b[i + 3 * stride];
        i += LANES * stride;
    }
    while i < n {
        acc[0] += a[i] * b[i];
        i += stride;
    }

    (acc[0] + acc[1]) + (acc[2] + acc[3])
}
