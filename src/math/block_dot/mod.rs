//! # Block Dot Product
//!
//! All `8 x 4` pairwise dot products between the rows of A (`8 x n`) and the
//! columns of B (`n x 4`), i.e. a small matrix product `C = A * B`. Every
//! block variant reuses a vector kernel per cell.

pub mod code;
#[cfg(test)]
pub mod test;

pub use code::*;

use crate::config::RunConfig;
use crate::math::dot_product::dot_product_reference;
use crate::math::KernelContext;
use crate::registry::BenchmarkRunner;
use crate::utils::timer::{check_block, time_variant, Outcome, Sample};
use crate::utils::CpuPinGuard;
use rand::rngs::StdRng;
use rand::Rng;

/// Random operand sets checked per verification pass
const VERIFY_ROUNDS: usize = 4;

/// Floating-point operations of one block product with inner length `len`.
pub fn block_flops(len: usize) -> u64 {
    2 * (ROWS * COLS) as u64 * len as u64
}

/// Reference block, one independent sequential dot product per cell.
pub fn reference_block(operands: &BlockOperands) -> [f64; CELLS] {
    let mut c = [0.0; CELLS];
    for j in 0..ROWS {
        for k in 0..COLS {
            c[j * COLS + k] = dot_product_reference(operands.a_row(j), operands.b_col(k));
        }
    }
    c
}

/// Runner for the 8x4 block dot product
pub struct BlockDotRunner;

impl BenchmarkRunner for BlockDotRunner {
    fn name(&self) -> &'static str {
        "block_dot"
    }

    fn description(&self) -> &'static str {
        "8x4 block of dot products (C = A * B, A row-major, B column-major)"
    }

    fn ops(&self, len: usize) -> u64 {
        block_flops(len)
    }

    fn variant_descriptions(&self, ctx: &KernelContext) -> Vec<(&'static str, &'static str)> {
        code::available_variants(ctx)
            .iter()
            .map(|v| (v.name, v.description))
            .collect()
    }

    fn run(&self, ctx: &KernelContext, config: &RunConfig) -> Vec<Sample> {
        let operands = BlockOperands::new(config.length);
        let ops = self.ops(config.length);
        let reference = reference_block(&operands);
        log::debug!("block_dot: n={} nreps={}", config.length, config.nreps);

        let mut samples = Vec::new();
        for variant in code::available_variants(ctx) {
            let _pin = (config.pin && !variant.parallel).then(CpuPinGuard::new);
            let kernel = &variant.function;
            samples.extend(time_variant(
                variant.name,
                config.nreps,
                ops,
                || {
                    let mut c = [0.0; CELLS];
                    kernel(&operands, c.as_mut_slice())?;
                    Ok(c)
                },
                |c| check_block(c, &reference, COLS),
            ));
        }
        samples
    }

    fn verify(&self, ctx: &KernelContext, rng: &mut StdRng) -> Result<(), String> {
        let variants = code::available_variants(ctx);
        if variants.is_empty() {
            return Err("No block variants registered".to_string());
        }

        for _ in 0..VERIFY_ROUNDS {
            let len = rng.random_range(1..=200);
            let a: Vec<f64> = (0..ROWS * len).map(|_| rng.random_range(-1.0..1.0)).collect();
            let b: Vec<f64> = (0..COLS * len).map(|_| rng.random_range(-1.0..1.0)).collect();
            let operands = BlockOperands::from_parts(len, a, b);
            let expected = reference_block(&operands);

            for variant in &variants {
                let mut c = [0.0; CELLS];
                (variant.function)(&operands, c.as_mut_slice())
                    .map_err(|e| format!("Variant '{}' failed: {}", variant.name, e))?;

                if let Outcome::CellMismatches(cells) = check_block(&c, &expected, COLS) {
                    let first = &cells[0];
                    return Err(format!(
                        "Variant '{}' failed verification at [{},{}]. Expected {}, got {} ({} cells off)",
                        variant.name,
                        first.row,
                        first.col,
                        first.expected,
                        first.got,
                        cells.len()
                    ));
                }
            }
        }

        Ok(())
    }
}
