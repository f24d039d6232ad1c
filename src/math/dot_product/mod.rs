//! # Dot Product
//!
//! The dot product computes the sum of products of corresponding elements
//! in two vectors:
//!
//! `dot(a, b) = Σ(a[i] * b[i])`
//!
//! ## Strategies
//!
//! - **Partial-sum unrolling**: independent accumulators break the serial add chain
//! - **Even/odd interleave**: the two-accumulator special case
//! - **Static stride**: worker `t` owns every `W`-th element
//! - **Scheduler chunks**: contiguous chunks handed out by a work-stealing pool
//! - **Reduction**: the pool's parallel sum
//! - **Lanes**: four accumulators per worker, SSE2 on x86_64

pub mod code;
#[cfg(test)]
pub mod test;

pub use code::*;

use crate::config::{Oracle, RunConfig};
use crate::math::KernelContext;
use crate::registry::BenchmarkRunner;
use crate::utils::timer::{check_scalar, time_variant, Sample, TOLERANCE};
use crate::utils::CpuPinGuard;
use rand::rngs::StdRng;
use rand::Rng;

/// Random vectors checked per verification pass
const VERIFY_ROUNDS: usize = 8;
/// Verification lengths are `step * k` with `k` in `1..=VERIFY_MAX_MULTIPLE`
const VERIFY_MAX_MULTIPLE: usize = 64;
/// Largest length step verification accepts (vectors stay under 64Ki elements)
const MAX_VERIFY_STEP: usize = 1024;

/// Benchmark inputs: `a[i] = 2(i+1)`, `b[i] = 1/(i+1)`.
///
/// Every product is 2 up to rounding, so the dot product is `2n` within tolerance.
pub fn init_vectors(len: usize) -> (Vec<f64>, Vec<f64>) {
    let a = (0..len).map(|i| 2.0 * (i + 1) as f64).collect();
    let b = (0..len).map(|i| 1.0 / (i + 1) as f64).collect();
    (a, b)
}

/// Floating-point operations of one dot product of length `len`.
pub fn flops(len: usize) -> u64 {
    2 * len as u64
}

/// Expected value of a scalar run under the given oracle.
pub fn expected_value(oracle: Oracle, a: &[f64], b: &[f64]) -> f64 {
    match oracle {
        Oracle::Flops => flops(a.len()) as f64,
        Oracle::Reference => dot_product_reference(a, b),
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> Option<usize> {
    (a / gcd(a, b)).checked_mul(b)
}

/// Runner for the single dot product
pub struct DotProductRunner;

impl BenchmarkRunner for DotProductRunner {
    fn name(&self) -> &'static str {
        "dot_product"
    }

    fn description(&self) -> &'static str {
        "Sum of products of two vectors"
    }

    fn ops(&self, len: usize) -> u64 {
        flops(len)
    }

    fn variant_descriptions(&self, ctx: &KernelContext) -> Vec<(&'static str, &'static str)> {
        code::available_variants(ctx)
            .iter()
            .map(|v| (v.name, v.description))
            .collect()
    }

    fn run(&self, ctx: &KernelContext, config: &RunConfig) -> Vec<Sample> {
        let (a, b) = init_vectors(config.length);
        let ops = self.ops(config.length);
        let expected = expected_value(config.oracle, &a, &b);
        log::debug!(
            "dot_product: n={} nreps={} expected={} ({:?} oracle)",
            config.length,
            config.nreps,
            expected,
            config.oracle
        );

        let mut samples = Vec::new();
        for variant in code::available_variants(ctx) {
            let _pin = (config.pin && !variant.parallel).then(CpuPinGuard::new);
            let kernel = &variant.function;
            samples.extend(time_variant(
                variant.name,
                config.nreps,
                ops,
                || kernel(a.as_slice(), b.as_slice()),
                |&result| check_scalar(result, expected),
            ));
        }
        samples
    }

    fn verify(&self, ctx: &KernelContext, rng: &mut StdRng) -> Result<(), String> {
        let variants = code::available_variants(ctx);
        let reference = variants
            .iter()
            .find(|v| v.name == REFERENCE_VARIANT)
            .ok_or("No 'reference' variant found")?;

        // Lengths every variant accepts: even, and divisible by both unroll factors.
        // A runtime factor that would need longer vectors is left out of the check.
        let base = 2 / gcd(2, COMPILE_TIME_FACTOR) * COMPILE_TIME_FACTOR;
        let (step, runtime_checked) = match lcm(base, ctx.unroll_factor.max(1)) {
            Some(step) if step <= MAX_VERIFY_STEP => (step, true),
            _ => {
                log::warn!(
                    "skipping {} in verification: unroll factor {} exceeds the verification length",
                    RUNTIME_UNROLL_VARIANT,
                    ctx.unroll_factor
                );
                (base, false)
            }
        };
        let variants: Vec<_> = variants
            .iter()
            .filter(|v| runtime_checked || v.name != RUNTIME_UNROLL_VARIANT)
            .collect();

        for _ in 0..VERIFY_ROUNDS {
            let len = step * rng.random_range(1..=VERIFY_MAX_MULTIPLE);
            let a: Vec<f64> = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
            let b: Vec<f64> = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();

            let expected = (reference.function)(a.as_slice(), b.as_slice())
                .map_err(|e| format!("reference failed: {}", e))?;

            for variant in &variants {
                let result = (variant.function)(a.as_slice(), b.as_slice()).map_err(|e| {
                    format!("Variant '{}' rejected length {}: {}", variant.name, len, e)
                })?;
                let diff = (result - expected).abs();
                if diff > TOLERANCE {
                    return Err(format!(
                        "Variant '{}' failed verification. Expected {}, got {}, diff {}",
                        variant.name, expected, result, diff
                    ));
                }
            }
        }

        Ok(())
    }
}
