use dot_bench::config::{Oracle, RunConfig};
use dot_bench::math::block_dot::{self, reference_block, BlockOperands, COLS, ROWS};
use dot_bench::math::dot_product::{
    self, dot_product_chunked, dot_product_even_odd, dot_product_reduction_simd,
    dot_product_reference, dot_product_strided, dot_product_unrolled, init_vectors,
};
use dot_bench::math::KernelContext;
use dot_bench::prelude::KernelError;
use dot_bench::run_benchmarks;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-10;

fn assert_close(expected: f64, actual: f64, name: &str) {
    assert!(
        (expected - actual).abs() <= EPSILON,
        "{}: expected {}, got {}",
        name,
        expected,
        actual
    );
}

fn random_vectors(rng: &mut StdRng, len: usize) -> (Vec<f64>, Vec<f64>) {
    let a = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    let b = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    (a, b)
}

// ============================================================
// Vector kernels
// ============================================================

#[test]
fn test_init_pattern_sums_to_flops() {
    for n in [2, 8, 100, 1000] {
        let (a, b) = init_vectors(n);
        assert_close(dot_product::flops(n) as f64, dot_product_reference(&a, &b), "reference");
    }
}

#[test]
fn test_every_variant_on_benchmark_pattern() {
    let ctx = KernelContext::new(4, 4).expect("pool");
    let (a, b) = init_vectors(400);

    for v in dot_product::available_variants(&ctx) {
        let got = (v.function)(&a, &b).unwrap_or_else(|e| panic!("{}: {}", v.name, e));
        assert_close(800.0, got, v.name);
    }
}

#[test]
fn test_parallel_kernels_with_more_workers_than_elements() {
    let ctx = KernelContext::new(4, 8).expect("pool");
    let a = vec![1.0, 2.0, 3.0];
    let b = vec![4.0, 5.0, 6.0];

    assert_close(32.0, dot_product_strided(&a, &b, 8), "strided");
    assert_close(32.0, dot_product_chunked(ctx.pool(), &a, &b), "chunked");
    assert_close(32.0, dot_product_reduction_simd(ctx.pool(), &a, &b), "reduction_simd");
}

#[test]
fn test_random_lengths_against_reference() {
    let ctx = KernelContext::new(2, 3).expect("pool");
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..10 {
        let len = 4 * rng.random_range(1..=64);
        let (a, b) = random_vectors(&mut rng, len);
        let expected = dot_product_reference(&a, &b);

        for v in dot_product::available_variants(&ctx) {
            let got = (v.function)(&a, &b).unwrap_or_else(|e| panic!("{}: {}", v.name, e));
            assert_close(expected, got, v.name);
        }
    }
}

#[test]
fn test_domain_errors() {
    let a = vec![1.0; 16];
    assert_eq!(
        dot_product_unrolled(&a, &a, 3),
        Err(KernelError::IndivisibleLength { len: 16, factor: 3 })
    );
    assert_eq!(dot_product_unrolled(&a, &a, 0), Err(KernelError::ZeroUnrollFactor));
    assert_eq!(
        dot_product_even_odd(&a[..15], &a[..15]),
        Err(KernelError::OddLength { len: 15 })
    );
}

#[test]
fn test_empty_vectors() {
    let ctx = KernelContext::new(4, 4).expect("pool");
    for v in dot_product::available_variants(&ctx) {
        assert_eq!((v.function)(&[], &[]), Ok(0.0), "{}", v.name);
    }
}

// ============================================================
// Block kernels
// ============================================================

#[test]
fn test_block_variants_on_benchmark_pattern() {
    let ctx = KernelContext::new(4, 4).expect("pool");
    let operands = BlockOperands::new(64);
    let expected = reference_block(&operands);

    for v in block_dot::available_variants(&ctx) {
        let mut c = vec![f64::NAN; ROWS * COLS];
        (v.function)(&operands, &mut c).unwrap_or_else(|e| panic!("{}: {}", v.name, e));
        for (cell, (&e, &g)) in expected.iter().zip(&c).enumerate() {
            assert_close(e, g, &format!("{}[{},{}]", v.name, cell / COLS, cell % COLS));
        }
    }
}

#[test]
fn test_block_diagonal_cells_equal_length() {
    let n = 50;
    let expected = reference_block(&BlockOperands::new(n));
    for j in 0..COLS {
        assert_close(n as f64, expected[j * COLS + j], "diagonal");
    }
}

// ============================================================
// Driver
// ============================================================

#[test]
fn test_driver_vector_mode_with_reference_oracle() {
    let config = RunConfig {
        length: 64,
        nreps: 2,
        workers: 3,
        oracle: Oracle::Reference,
        ..RunConfig::default()
    };
    let samples = run_benchmarks(&config).expect("run");
    assert_eq!(samples.len(), 20);
    assert!(samples.iter().all(|s| s.outcome.is_valid()));
}

#[test]
fn test_driver_block_mode_single_worker() {
    let config = RunConfig {
        length: 10,
        nreps: 1,
        block: true,
        workers: 1,
        pin: true,
        ..RunConfig::default()
    };
    let samples = run_benchmarks(&config).expect("run");
    assert_eq!(samples.len(), 8);
    assert_eq!(samples.last().map(|s| s.name), Some("reduction_simd_reordered"));
    assert!(samples.iter().all(|s| s.outcome.is_valid()));
}
