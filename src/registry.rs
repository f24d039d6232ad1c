//! Benchmark registry.
//!
//! Each runner owns one kernel family (single dot product, block dot
//! product) and knows how to build its inputs, time every variant and
//! verify the variants against its reference.

use crate::config::RunConfig;
use crate::math::KernelContext;
use crate::utils::timer::Sample;
use rand::rngs::StdRng;

/// Trait that all kernel-family runners implement
pub trait BenchmarkRunner: Send + Sync {
    /// Name of the kernel family (e.g., "dot_product")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Floating-point operations of one kernel call at vector length `len`
    fn ops(&self, len: usize) -> u64;

    /// (name, description) of every variant, in run order
    fn variant_descriptions(&self, ctx: &KernelContext) -> Vec<(&'static str, &'static str)>;

    /// Variant names, in run order
    fn available_variants(&self, ctx: &KernelContext) -> Vec<&'static str> {
        self.variant_descriptions(ctx)
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Time every variant `config.nreps` times on the benchmark inputs.
    /// Each run is printed as it completes.
    fn run(&self, ctx: &KernelContext, config: &RunConfig) -> Vec<Sample>;

    /// Check every variant against the reference on random inputs.
    fn verify(&self, ctx: &KernelContext, rng: &mut StdRng) -> Result<(), String>;
}

/// Registry of all kernel families
pub struct BenchmarkRegistry {
    runners: Vec<Box<dyn BenchmarkRunner>>,
}

impl BenchmarkRegistry {
    pub fn new() -> Self {
        Self {
            runners: Vec::new(),
        }
    }

    pub fn register<R: BenchmarkRunner + 'static>(&mut self, runner: R) {
        self.runners.push(Box::new(runner));
    }

    pub fn all(&self) -> &[Box<dyn BenchmarkRunner>] {
        &self.runners
    }

    /// Find a runner by name
    pub fn find(&self, name: &str) -> Option<&dyn BenchmarkRunner> {
        self.runners
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    /// Runner for the selected mode: block dot products or a single dot product
    pub fn for_mode(&self, block: bool) -> Option<&dyn BenchmarkRunner> {
        self.find(if block { BLOCK_DOT } else { DOT_PRODUCT })
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.runners.iter().map(|r| r.name()).collect()
    }
}

impl Default for BenchmarkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const DOT_PRODUCT: &str = "dot_product";
const BLOCK_DOT: &str = "block_dot";

/// Build the registry with every kernel family
pub fn build_registry() -> BenchmarkRegistry {
    let mut registry = BenchmarkRegistry::new();

    registry.register(crate::math::dot_product::DotProductRunner);
    registry.register(crate::math::block_dot::BlockDotRunner);

    registry
}
