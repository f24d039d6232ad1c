//! Command-line driver.
//!
//! Usage:
//!   dot-bench                          # Time single dot product variants
//!   dot-bench --length=1000 --nreps=5  # Custom length and repetitions
//!   dot-bench --block                  # Time 8x4 block dot product variants
//!   dot-bench --unroll_factor=8        # Runtime unroll factor
//!   dot-bench --list                   # List variants of the selected mode
//!   dot-bench --verify --seed 42       # Check every variant on random inputs
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default: warn).

use clap::Parser;
use dot_bench::config::{Args, RunConfig};
use dot_bench::utils::runner;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = RunConfig::from(&args);

    if args.list {
        if let Err(e) = runner::list_variants(&config) {
            log::error!("{}", e);
        }
        return;
    }

    if args.verify {
        match runner::verify_all(&config, args.seed) {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Benchmark runs always exit successfully; problems are reported inline
    if let Err(e) = runner::run_benchmarks(&config) {
        log::error!("{}", e);
    }
}
