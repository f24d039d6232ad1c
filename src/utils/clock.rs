//! Tick source for kernel timing.
//!
//! By default (`cpu_cycles` feature) ticks come from the CPU cycle counter:
//! RDTSC fenced with LFENCE on x86/x86_64, `CNTVCT_EL0` on aarch64. With
//! `use_time`, or on other architectures, ticks are wall-clock nanoseconds.

#[cfg(all(
    feature = "cpu_cycles",
    not(feature = "use_time"),
    any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")
))]
mod source {
    /// Raw counter reading
    pub type Stamp = u64;

    #[inline(always)]
    pub fn now() -> Stamp {
        read_cycles()
    }

    #[inline(always)]
    pub fn ticks_since(start: Stamp) -> u64 {
        read_cycles().saturating_sub(start)
    }

    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    fn read_cycles() -> u64 {
        use core::arch::x86_64::{_mm_lfence, _rdtsc};
        // SAFETY: LFENCE and RDTSC are available on every x86_64 CPU.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "x86")]
    #[inline(always)]
    fn read_cycles() -> u64 {
        use core::arch::x86::{_mm_lfence, _rdtsc};
        // SAFETY: requires SSE2 for LFENCE, as does any x86 target Rust supports by default.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    #[inline(always)]
    fn read_cycles() -> u64 {
        // Fixed-frequency virtual timer, readable from userspace
        let val: u64;
        // SAFETY: CNTVCT_EL0 is readable at EL0 on Linux and macOS.
        unsafe {
            core::arch::asm!("mrs {}, cntvct_el0", out(reg) val);
        }
        val
    }

    pub const fn unit_name() -> &'static str {
        #[cfg(target_arch = "aarch64")]
        {
            "ticks"
        }
        #[cfg(not(target_arch = "aarch64"))]
        {
            "cycles"
        }
    }
}

#[cfg(not(all(
    feature = "cpu_cycles",
    not(feature = "use_time"),
    any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")
)))]
mod source {
    use std::time::Instant;

    pub type Stamp = Instant;

    #[inline(always)]
    pub fn now() -> Stamp {
        Instant::now()
    }

    #[inline(always)]
    pub fn ticks_since(start: Stamp) -> u64 {
        start.elapsed().as_nanos() as u64
    }

    pub const fn unit_name() -> &'static str {
        "ns"
    }
}

pub use source::Stamp;

/// Read the tick source.
#[inline(always)]
pub fn now() -> Stamp {
    source::now()
}

/// Ticks elapsed since `start`.
#[inline(always)]
pub fn ticks_since(start: Stamp) -> u64 {
    source::ticks_since(start)
}

/// Name of the tick unit ("cycles", "ticks" or "ns").
pub const fn unit_name() -> &'static str {
    source::unit_name()
}

/// Run `f` once between two tick readings.
#[inline(always)]
pub fn measure<F, R>(f: F) -> (u64, R)
where
    F: FnOnce() -> R,
{
    let start = now();
    let result = f();
    (ticks_since(start), result)
}
