//! Tests for dot product implementations.

use crate::config::Oracle;
use crate::error::KernelError;
use crate::math::dot_product::*;
use crate::math::KernelContext;
use crate::registry::BenchmarkRunner;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-10;

fn assert_close(got: f64, expected: f64, msg: &str) {
    let diff = (got - expected).abs();
    assert!(
        diff <= EPSILON,
        "{}: expected {}, got {}, diff = {}",
        msg,
        expected,
        got,
        diff
    );
}

fn context(unroll_factor: usize) -> KernelContext {
    KernelContext::new(unroll_factor, 4).expect("worker pool")
}

fn random_vectors(rng: &mut StdRng, len: usize) -> (Vec<f64>, Vec<f64>) {
    let a = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    let b = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    (a, b)
}

#[test]
fn test_reference_basic() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0, 7.0, 8.0];
    // 1*5 + 2*6 + 3*7 + 4*8 = 5 + 12 + 21 + 32 = 70
    assert_close(dot_product_reference(&a, &b), 70.0, "reference basic");
}

#[test]
fn test_reference_empty() {
    assert_eq!(dot_product_reference(&[], &[]), 0.0);
}

#[test]
#[should_panic(expected = "same length")]
fn test_reference_length_mismatch() {
    dot_product_reference(&[1.0, 2.0], &[1.0]);
}

#[test]
fn test_init_pattern_length_8() {
    let (a, b) = init_vectors(8);
    assert_eq!(a, vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
    assert_eq!(b[0], 1.0);
    assert_eq!(b[1], 0.5);
    assert_eq!(b[7], 0.125);

    // Each term 2(i+1) * 1/(i+1) is 2, so the sum is 2 * 8
    let expected: f64 = (0..8).map(|i| 2.0 * (i + 1) as f64 * (1.0 / (i + 1) as f64)).sum();
    assert_close(expected, 16.0, "formula-derived expectation");
    assert_close(dot_product_reference(&a, &b), expected, "reference on init pattern");
}

#[test]
fn test_flop_oracle_matches_init_pattern() {
    // The operation count 2n is only a valid oracle because this input pattern
    // makes every product 2 up to rounding.
    for len in [0, 1, 7, 8, 100, 1000] {
        let (a, b) = init_vectors(len);
        let by_flops = expected_value(Oracle::Flops, &a, &b);
        let by_reference = expected_value(Oracle::Reference, &a, &b);
        assert_eq!(by_flops, flops(len) as f64);
        assert_close(by_reference, by_flops, "oracles agree");
    }
}

#[test]
fn test_flop_oracle_wrong_for_other_inputs() {
    let a = vec![1.0; 10];
    let b = vec![1.0; 10];
    assert_eq!(expected_value(Oracle::Flops, &a, &b), 20.0);
    assert_eq!(expected_value(Oracle::Reference, &a, &b), 10.0);
}

#[test]
fn test_all_variants_match_reference_random() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let ctx = context(4);
    let variants = available_variants(&ctx);

    for len in [0, 4, 8, 12, 64, 100, 1000, 4096] {
        let (a, b) = random_vectors(&mut rng, len);
        let expected = dot_product_reference(&a, &b);
        for v in &variants {
            let got = (v.function)(&a, &b).expect("length divisible by every factor");
            assert_close(got, expected, &format!("{} at len {}", v.name, len));
        }
    }
}

#[test]
fn test_all_variants_match_reference_init_pattern() {
    let ctx = context(4);
    for len in [8, 100, 256] {
        let (a, b) = init_vectors(len);
        let expected = 2.0 * len as f64;
        for v in available_variants(&ctx) {
            let got = (v.function)(&a, &b).expect("valid length");
            assert_close(got, expected, &format!("{} at len {}", v.name, len));
        }
    }
}

#[test]
fn test_parallel_variants_any_length() {
    let mut rng = StdRng::seed_from_u64(7);
    let ctx = context(4);
    let pool = ctx.pool();

    for len in [1, 2, 3, 5, 17, 31, 255, 1023] {
        let (a, b) = random_vectors(&mut rng, len);
        let expected = dot_product_reference(&a, &b);
        for workers in [1, 2, 3, 4, 7] {
            assert_close(dot_product_strided(&a, &b, workers), expected, "strided");
            assert_close(dot_product_strided_simd(&a, &b, workers), expected, "strided_simd");
        }
        assert_close(dot_product_chunked(pool, &a, &b), expected, "chunked");
        assert_close(dot_product_chunked_simd(pool, &a, &b), expected, "chunked_simd");
        assert_close(dot_product_reduction(pool, &a, &b), expected, "reduction");
        assert_close(dot_product_reduction_simd(pool, &a, &b), expected, "reduction_simd");
    }
}

#[test]
fn test_runtime_unroll_rejects_indivisible_length() {
    let (a, b) = init_vectors(16);
    assert_eq!(
        dot_product_unrolled(&a, &b, 3),
        Err(KernelError::IndivisibleLength { len: 16, factor: 3 })
    );

    let ctx = context(3);
    let variant = find_variant(&ctx, "unroll_runtime").expect("registered");
    assert_eq!(
        (variant.function)(&a, &b),
        Err(KernelError::IndivisibleLength { len: 16, factor: 3 })
    );
}

#[test]
fn test_unroll_divisibility_property() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let len = rng.random_range(0..200);
        let m = rng.random_range(1..12);
        let (a, b) = random_vectors(&mut rng, len);
        match dot_product_unrolled(&a, &b, m) {
            Ok(got) => {
                assert_eq!(len % m, 0, "len {} m {} should have been rejected", len, m);
                assert_close(got, dot_product_reference(&a, &b), "unrolled");
            }
            Err(err) => {
                assert_ne!(len % m, 0, "len {} m {} should have been accepted", len, m);
                assert_eq!(err, KernelError::IndivisibleLength { len, factor: m });
            }
        }
    }
}

#[test]
fn test_compile_time_unroll() {
    let (a, b) = init_vectors(12);
    assert_close(
        dot_product_unrolled_const::<COMPILE_TIME_FACTOR>(&a, &b).expect("12 % 4 == 0"),
        24.0,
        "const unroll",
    );
    let (a, b) = init_vectors(10);
    assert_eq!(
        dot_product_unrolled_const::<COMPILE_TIME_FACTOR>(&a, &b),
        Err(KernelError::IndivisibleLength { len: 10, factor: 4 })
    );
}

#[test]
fn test_even_odd_domain() {
    let mut rng = StdRng::seed_from_u64(99);
    for len in 0..64 {
        let (a, b) = random_vectors(&mut rng, len);
        let result = dot_product_even_odd(&a, &b);
        if len % 2 == 0 {
            let got = result.expect("even length accepted");
            assert_close(got, dot_product_reference(&a, &b), "even_odd");
        } else {
            assert_eq!(result, Err(KernelError::OddLength { len }));
        }
    }
}

#[test]
fn test_variant_order() {
    let ctx = context(4);
    let names: Vec<_> = available_variants(&ctx).iter().map(|v| v.name).collect();
    assert_eq!(names[0], REFERENCE_VARIANT);
    assert_eq!(
        names,
        vec![
            "reference",
            "strided",
            "chunked",
            "reduction",
            "even_odd",
            "unroll_const",
            "unroll_runtime",
            "strided_simd",
            "chunked_simd",
            "reduction_simd",
        ]
    );
}

#[test]
fn test_verify_with_huge_unroll_factor() {
    // The runtime variant is left out; every other variant is still checked
    let mut rng = StdRng::seed_from_u64(7);
    for m in [1usize << 62, 1_000_003, usize::MAX] {
        let ctx = KernelContext::new(m, 1).expect("worker pool");
        assert_eq!(DotProductRunner.verify(&ctx, &mut rng), Ok(()), "m = {}", m);
    }
}

#[test]
fn test_verify_still_checks_moderate_unroll_factor() {
    let mut rng = StdRng::seed_from_u64(8);
    let ctx = KernelContext::new(7, 2).expect("worker pool");
    assert_eq!(DotProductRunner.verify(&ctx, &mut rng), Ok(()));
}

#[test]
fn test_empty_vectors_with_huge_runtime_factor() {
    let ctx = context(usize::MAX);
    let variant = find_variant(&ctx, RUNTIME_UNROLL_VARIANT).expect("registered");
    assert_eq!((variant.function)(&[], &[]), Ok(0.0));
}
