//! Utility modules for timing, validation, reporting and execution.

pub mod clock;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use clock::{measure, now, ticks_since, unit_name};
pub use cpu_affinity::CpuPinGuard;
pub use timer::{compute_stats, time_variant, Outcome, Sample, VariantStats};

/// Information about a kernel variant.
/// Generic over F which is the kernel type.
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "reference", "chunked_simd")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Whether the kernel runs on more than one thread
    pub parallel: bool,
    /// The specific implementation
    pub function: F,
}
