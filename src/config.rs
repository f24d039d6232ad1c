//! Run configuration: command-line surface and the immutable settings derived from it.

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};

/// Default vector length
pub const DEFAULT_LENGTH: usize = 100;
/// Default repetitions per variant
pub const DEFAULT_NREPS: usize = 10;
/// Default runtime unroll factor
pub const DEFAULT_UNROLL_FACTOR: usize = 4;
/// Default number of parallel workers
pub const DEFAULT_WORKERS: usize = 4;
/// Upper bound on parallel workers
pub const MAX_WORKERS: usize = 256;

/// Where the expected value for scalar validation comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Oracle {
    /// Compare against the operation count (2n). Holds within tolerance for the driver's input pattern.
    #[default]
    Flops,
    /// Compare against the reference kernel's result.
    Reference,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dot-bench",
    version,
    about = "Time dot product and block dot product kernel variants"
)]
pub struct Args {
    /// Length of each vector
    #[arg(short = 'n', long, value_name = "size_t", default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Number of repetitions
    #[arg(short = 'r', long, value_name = "size_t", default_value_t = DEFAULT_NREPS)]
    pub nreps: usize,

    /// Compute block dot products (versus a single dot product)
    #[arg(short = 'b', long)]
    pub block: bool,

    /// Runtime unrolling factor for dot product
    #[arg(
        short = 'm',
        long = "unroll_factor",
        visible_alias = "unroll-factor",
        value_name = "size_t",
        default_value_t = DEFAULT_UNROLL_FACTOR
    )]
    pub unroll_factor: usize,

    /// Number of parallel workers
    #[arg(
        short = 'w',
        long,
        default_value_t = DEFAULT_WORKERS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_WORKERS as u64)
    )]
    pub workers: usize,

    /// Expected value used to validate single dot products
    #[arg(long, value_enum, default_value_t = Oracle::Flops)]
    pub oracle: Oracle,

    /// Pin the driver thread to its core while timing sequential variants
    #[arg(long)]
    pub pin: bool,

    /// Print a per-variant statistics table after the raw runs
    #[arg(long)]
    pub summary: bool,

    /// List the variants of the selected mode and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Check every variant against the reference on random inputs and exit
    #[arg(long)]
    pub verify: bool,

    /// Seed for --verify inputs (default: time-based)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Settings for a single benchmark run. Built once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub length: usize,
    pub nreps: usize,
    pub block: bool,
    pub unroll_factor: usize,
    pub workers: usize,
    pub oracle: Oracle,
    pub pin: bool,
    pub summary: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            nreps: DEFAULT_NREPS,
            block: false,
            unroll_factor: DEFAULT_UNROLL_FACTOR,
            workers: DEFAULT_WORKERS,
            oracle: Oracle::default(),
            pin: false,
            summary: false,
        }
    }
}

impl From<&Args> for RunConfig {
    fn from(args: &Args) -> Self {
        Self {
            length: args.length,
            nreps: args.nreps,
            block: args.block,
            unroll_factor: args.unroll_factor,
            workers: args.workers,
            oracle: args.oracle,
            pin: args.pin,
            summary: args.summary,
        }
    }
}
