//! Tests for block dot product implementations.

use crate::error::KernelError;
use crate::math::block_dot::*;
use crate::math::dot_product::dot_product_reference;
use crate::math::KernelContext;
use crate::utils::timer::{check_block, Outcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-10;

fn random_operands(rng: &mut StdRng, len: usize) -> BlockOperands {
    let a = (0..ROWS * len).map(|_| rng.random_range(-1.0..1.0)).collect();
    let b = (0..COLS * len).map(|_| rng.random_range(-1.0..1.0)).collect();
    BlockOperands::from_parts(len, a, b)
}

#[test]
fn test_init_pattern() {
    let ops = BlockOperands::new(3);
    assert_eq!(ops.a_row(0), &[1001.0, 2001.0, 3001.0]);
    assert_eq!(ops.a_row(7), &[1008.0, 2008.0, 3008.0]);
    assert_eq!(ops.b_col(0)[0], 1.0 / 1001.0);
    assert_eq!(ops.b_col(3)[2], 1.0 / 3004.0);
}

#[test]
fn test_diagonal_terms_are_one() {
    // Row j of A against column k == j of B gives products of 1 per term, up to rounding
    let len = 50;
    let c = reference_block(&BlockOperands::new(len));
    for d in 0..COLS {
        assert!((c[d * COLS + d] - len as f64).abs() < 1e-9);
    }
}

#[test]
fn test_block_flops() {
    assert_eq!(block_flops(100), 6400);
    assert_eq!(block_flops(0), 0);
}

#[test]
fn test_traversal_orders_agree() {
    let mut rng = StdRng::seed_from_u64(3);
    for len in [1, 2, 9, 64, 333] {
        let ops = random_operands(&mut rng, len);
        let mut row_major = [0.0; CELLS];
        let mut col_major = [0.0; CELLS];
        block_dot(&ops, &mut row_major, Traversal::RowMajor, |a, b| {
            Ok(dot_product_reference(a, b))
        })
        .expect("reference never fails");
        block_dot(&ops, &mut col_major, Traversal::ColumnMajor, |a, b| {
            Ok(dot_product_reference(a, b))
        })
        .expect("reference never fails");
        assert_eq!(row_major, col_major);
    }
}

#[test]
fn test_all_variants_match_independent_reference() {
    let mut rng = StdRng::seed_from_u64(0xb10c);
    let ctx = KernelContext::new(4, 4).expect("worker pool");
    let variants = available_variants(&ctx);
    assert_eq!(variants.len(), 8);

    for len in [1, 7, 100, 1000] {
        let ops = random_operands(&mut rng, len);
        for v in &variants {
            let mut c = [0.0; CELLS];
            (v.function)(&ops, &mut c).expect("block kernels accept any length");
            for j in 0..ROWS {
                for k in 0..COLS {
                    let expected = dot_product_reference(ops.a_row(j), ops.b_col(k));
                    let got = c[j * COLS + k];
                    assert!(
                        (got - expected).abs() <= EPSILON,
                        "{}[{},{}] at len {}: expected {}, got {}",
                        v.name,
                        j,
                        k,
                        len,
                        expected,
                        got
                    );
                }
            }
        }
    }
}

#[test]
fn test_variants_on_init_pattern() {
    let ctx = KernelContext::new(4, 4).expect("worker pool");
    let ops = BlockOperands::new(100);
    let reference = reference_block(&ops);
    for v in available_variants(&ctx) {
        let mut c = [0.0; CELLS];
        (v.function)(&ops, &mut c).expect("valid");
        assert_eq!(check_block(&c, &reference, COLS), Outcome::Valid, "{}", v.name);
    }
}

#[test]
fn test_reordered_variant_registered() {
    let ctx = KernelContext::new(4, 2).expect("worker pool");
    let names: Vec<_> = available_variants(&ctx).iter().map(|v| v.name).collect();
    assert_eq!(names.first(), Some(&REFERENCE_VARIANT));
    assert_eq!(names.last(), Some(&"reduction_simd_reordered"));
}

#[test]
fn test_block_dot_propagates_kernel_error() {
    let ops = BlockOperands::new(6);
    let mut c = [f64::NAN; CELLS];
    let result = block_dot(&ops, &mut c, Traversal::RowMajor, |a, _| {
        Err(KernelError::IndivisibleLength { len: a.len(), factor: 4 })
    });
    assert_eq!(result, Err(KernelError::IndivisibleLength { len: 6, factor: 4 }));
}

#[test]
#[should_panic(expected = "A: expected")]
fn test_from_parts_checks_shape() {
    BlockOperands::from_parts(3, vec![0.0; 10], vec![0.0; 12]);
}
