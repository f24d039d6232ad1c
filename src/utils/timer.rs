//! Timing and validation harness.
//!
//! Each kernel call is bracketed by two tick readings, its result checked
//! against an expected value, and the resulting [`Sample`] printed at once.
//! Validation failures and kernel errors are reported and the run goes on.

use super::clock::measure;
use super::tui;
use crate::error::KernelError;
use std::hint::black_box;

/// Absolute tolerance for every result comparison
pub const TOLERANCE: f64 = 1e-10;

/// One cell of a block result that failed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct CellMismatch {
    pub row: usize,
    pub col: usize,
    pub got: f64,
    pub expected: f64,
}

/// Validation verdict for one kernel call.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Valid,
    /// Scalar result outside tolerance
    Mismatch { got: f64, expected: f64 },
    /// Block cells outside tolerance, in row-major order
    CellMismatches(Vec<CellMismatch>),
    /// The kernel rejected its configuration
    Failed(KernelError),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid)
    }
}

/// Compare a scalar result with its expected value.
pub fn check_scalar(got: f64, expected: f64) -> Outcome {
    if (got - expected).abs() > TOLERANCE || got.is_nan() {
        Outcome::Mismatch { got, expected }
    } else {
        Outcome::Valid
    }
}

/// Compare a row-major block result with the reference block, cell by cell.
///
/// # Panics
/// Panics if the blocks differ in size or `cols` is zero.
pub fn check_block(got: &[f64], expected: &[f64], cols: usize) -> Outcome {
    assert_eq!(got.len(), expected.len(), "Blocks must have the same size");
    assert!(cols > 0, "cols must be positive");

    let mismatches: Vec<CellMismatch> = got
        .iter()
        .zip(expected)
        .enumerate()
        .filter(|(_, (g, e))| (*g - *e).abs() > TOLERANCE || g.is_nan())
        .map(|(idx, (&got, &expected))| CellMismatch {
            row: idx / cols,
            col: idx % cols,
            got,
            expected,
        })
        .collect();

    if mismatches.is_empty() {
        Outcome::Valid
    } else {
        Outcome::CellMismatches(mismatches)
    }
}

/// A single timed kernel call.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Variant name
    pub name: &'static str,
    /// Floating-point operations performed
    pub ops: u64,
    /// Elapsed ticks
    pub ticks: u64,
    /// Operations per tick
    pub throughput: f64,
    pub outcome: Outcome,
}

impl Sample {
    pub fn new(name: &'static str, ops: u64, ticks: u64, outcome: Outcome) -> Self {
        Self {
            name,
            ops,
            ticks,
            throughput: ops as f64 / ticks.max(1) as f64,
            outcome,
        }
    }
}

/// Time `kernel` `nreps` times, validating and printing each run.
///
/// # Arguments
/// * `name` - Variant name used in the report
/// * `ops` - Operation count of one call
/// * `kernel` - One kernel call; errors are reported as [`Outcome::Failed`]
/// * `validate` - Verdict for a successful result
pub fn time_variant<R, K, V>(
    name: &'static str,
    nreps: usize,
    ops: u64,
    mut kernel: K,
    mut validate: V,
) -> Vec<Sample>
where
    K: FnMut() -> Result<R, KernelError>,
    V: FnMut(&R) -> Outcome,
{
    let mut samples = Vec::with_capacity(nreps);

    for _ in 0..nreps {
        let (ticks, result) = measure(|| kernel());
        let outcome = match result {
            Ok(value) => validate(&black_box(value)),
            Err(err) => {
                log::warn!("{}: {}", name, err);
                Outcome::Failed(err)
            }
        };
        if let Outcome::Mismatch { .. } | Outcome::CellMismatches(_) = outcome {
            log::warn!("{}: result failed validation", name);
        }

        let sample = Sample::new(name, ops, ticks, outcome);
        tui::print_sample(&sample);
        samples.push(sample);
    }

    samples
}

/// Aggregate statistics for one variant
#[derive(Clone, Debug, PartialEq)]
pub struct VariantStats {
    pub name: &'static str,
    pub runs: usize,
    /// Runs that failed validation or were rejected
    pub failures: usize,
    pub min_ticks: u64,
    pub median_ticks: u64,
    pub max_ticks: u64,
    pub mean_ticks: f64,
    pub std_dev_ticks: f64,
    pub mean_throughput: f64,
}

/// Compute statistics from the samples of a single variant.
pub fn compute_stats(name: &'static str, samples: &[Sample]) -> VariantStats {
    if samples.is_empty() {
        return VariantStats {
            name,
            runs: 0,
            failures: 0,
            min_ticks: 0,
            median_ticks: 0,
            max_ticks: 0,
            mean_ticks: 0.0,
            std_dev_ticks: 0.0,
            mean_throughput: 0.0,
        };
    }

    let mut sorted: Vec<u64> = samples.iter().map(|s| s.ticks).collect();
    sorted.sort_unstable();

    let runs = sorted.len();
    let mean_ticks = sorted.iter().map(|&t| t as f64).sum::<f64>() / runs as f64;
    let variance = sorted
        .iter()
        .map(|&t| {
            let diff = t as f64 - mean_ticks;
            diff * diff
        })
        .sum::<f64>()
        / (runs - 1).max(1) as f64;

    VariantStats {
        name,
        runs,
        failures: samples.iter().filter(|s| !s.outcome.is_valid()).count(),
        min_ticks: sorted[0],
        median_ticks: sorted[runs / 2],
        max_ticks: sorted[runs - 1],
        mean_ticks,
        std_dev_ticks: variance.sqrt(),
        mean_throughput: samples.iter().map(|s| s.throughput).sum::<f64>() / runs as f64,
    }
}

/// Group samples by variant (first-seen order) and compute statistics.
pub fn summarize(samples: &[Sample]) -> Vec<VariantStats> {
    let mut names: Vec<&'static str> = Vec::new();
    for sample in samples {
        if !names.contains(&sample.name) {
            names.push(sample.name);
        }
    }

    names
        .into_iter()
        .map(|name| {
            let group: Vec<Sample> = samples.iter().filter(|s| s.name == name).cloned().collect();
            compute_stats(name, &group)
        })
        .collect()
}
