//! Cache-line invalidation, one implementation per target instruction set.
//!
//! The measurement prologue wants every touched line evicted from the entire cache
//! hierarchy so each workload starts from a known cold state. On x86-64 the `clflush`
//! instruction does exactly that: it invalidates the line containing the given linear
//! address from all levels, data and instruction alike. The data is discarded, not
//! written back - the goal is a controlled starting state, not durability.
//!
//! On instruction sets without an unprivileged equivalent the cold-start guarantee is
//! simply unavailable: [`flush`] is a no-op and [`FLUSH_AVAILABLE`] is `false`, which the
//! driver reports as a measurement caveat instead of silently skipping the step.

/// Whether the build target can actually evict cache lines from the hierarchy.
#[cfg(target_arch = "x86_64")]
pub(crate) const FLUSH_AVAILABLE: bool = true;

/// Whether the build target can actually evict cache lines from the hierarchy.
#[cfg(not(target_arch = "x86_64"))]
pub(crate) const FLUSH_AVAILABLE: bool = false;

/// Invalidates the cache line containing `address` from every level of the hierarchy.
#[cfg(target_arch = "x86_64")]
#[inline]
pub(crate) fn flush(address: *const u8) {
    // SAFETY: `clflush` requires no alignment and faults only on addresses the process
    // could not access anyway; callers pass addresses inside their own live mappings.
    unsafe { core::arch::x86_64::_mm_clflush(address) };
}

/// Invalidates the cache line containing `address` from every level of the hierarchy.
///
/// This target has no unprivileged line-invalidation instruction, so this does nothing.
#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub(crate) fn flush(_address: *const u8) {}
