//! Driver: builds the kernel context, picks the runner for the selected mode
//! and hands it to the harness.

use super::timer::{summarize, Sample};
use super::tui;
use crate::config::RunConfig;
use crate::error::BenchError;
use crate::math::KernelContext;
use crate::registry::{build_registry, BenchmarkRunner};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

fn with_runner<T>(
    config: &RunConfig,
    f: impl FnOnce(&dyn BenchmarkRunner, &KernelContext) -> T,
) -> Result<T, BenchError> {
    let ctx = KernelContext::from_config(config)?;
    let registry = build_registry();
    let runner = registry
        .for_mode(config.block)
        .ok_or(BenchError::MissingRunner {
            mode: if config.block { "block" } else { "vector" },
        })?;
    Ok(f(runner, &ctx))
}

/// Time every variant of the selected mode and print the results.
///
/// Kernel errors and validation failures are reported inline and do not
/// stop the run.
pub fn run_benchmarks(config: &RunConfig) -> Result<Vec<Sample>, BenchError> {
    with_runner(config, |runner, ctx| {
        log::info!(
            "{}: length={} nreps={} unroll_factor={} workers={}",
            runner.name(),
            config.length,
            config.nreps,
            config.unroll_factor,
            config.workers
        );

        tui::print_run_header();
        let samples = runner.run(ctx, config);

        if config.summary {
            tui::print_summary_table(&summarize(&samples));
        }
        samples
    })
}

/// Print the variants of the selected mode.
pub fn list_variants(config: &RunConfig) -> Result<(), BenchError> {
    with_runner(config, |runner, ctx| {
        tui::print_variant_box(
            runner.name(),
            runner.description(),
            &runner.variant_descriptions(ctx),
        );
    })
}

/// Verify every registered kernel family on random inputs.
///
/// Returns `true` if all families passed.
pub fn verify_all(config: &RunConfig, seed: Option<u64>) -> Result<bool, BenchError> {
    let ctx = KernelContext::from_config(config)?;
    let seed = seed.unwrap_or_else(time_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    println!("Verifying with seed {}", seed);

    let mut all_ok = true;
    for runner in build_registry().all() {
        let result = runner.verify(&ctx, &mut rng);
        if let Err(e) = &result {
            log::warn!("{} failed verification: {}", runner.name(), e);
            all_ok = false;
        }
        tui::print_verify_result(runner.name(), &result);
    }
    Ok(all_ok)
}
