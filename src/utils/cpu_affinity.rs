//! Pinning the driver thread to one core while a sequential kernel is timed.
//!
//! Linux only (libc `sched_setaffinity`); elsewhere the guard is inert.
//! Parallel kernels are never run under a pin: threads spawned by a pinned
//! thread inherit its single-core mask.

#[cfg(target_os = "linux")]
mod platform {
    /// Saved affinity mask of the calling thread
    pub type Mask = libc::cpu_set_t;

    pub fn current_cpu() -> Option<usize> {
        // SAFETY: sched_getcpu has no preconditions.
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }

    pub fn save() -> Option<Mask> {
        // SAFETY: cpu_set_t is plain data; the kernel fills at most size_of bytes.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            (libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(set)
        }
    }

    pub fn pin(core_id: usize) -> bool {
        // SAFETY: the set is zero-initialised before CPU_SET touches it.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(mask: &Mask) -> bool {
        // SAFETY: `mask` came from sched_getaffinity on this thread.
        unsafe { libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), mask) == 0 }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type Mask = ();

    pub fn current_cpu() -> Option<usize> {
        None
    }
    pub fn save() -> Option<Mask> {
        None
    }
    pub fn pin(_core_id: usize) -> bool {
        false
    }
    pub fn restore(_mask: &Mask) -> bool {
        true
    }
}

/// Core the calling thread is running on, if the platform reports it.
pub fn current_cpu() -> Option<usize> {
    platform::current_cpu()
}

/// RAII guard: pins the calling thread to its current core, restores the
/// previous mask on drop.
///
/// # Example
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new(); // Thread pinned
///     // ... time a sequential kernel ...
/// } // Original affinity restored here
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    saved: Option<platform::Mask>,
}

impl CpuPinGuard {
    pub fn new() -> Self {
        let saved = platform::save();
        let pinned_core = match (saved.as_ref(), current_cpu()) {
            (Some(_), Some(core)) if platform::pin(core) => Some(core),
            _ => None,
        };
        if pinned_core.is_none() {
            log::debug!("cpu pinning unavailable, timing unpinned");
        }
        Self { pinned_core, saved }
    }

    /// Core this thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_none() {
            return;
        }
        if let Some(mask) = self.saved.as_ref() {
            if !platform::restore(mask) {
                log::warn!("failed to restore cpu affinity");
            }
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
