//! The timed-region harness: the prologue/epilogue pair bracketing one workload run.
//!
//! The prologue walks the region under test once, writing to every page so the kernel
//! materializes it (and the TLB learns it) before the clock starts, and evicting each
//! touched line from the cache hierarchy so the workload starts cold rather than
//! inheriting warmth from the walk itself. Only then are the activity counters and the
//! start timestamp captured - as the very last actions, so no setup time leaks into the
//! measured window.
//!
//! The epilogue mirrors it: stop the clock, read the counters again, and fold the sweep
//! parameter, the elapsed time and the counter deltas into one [`Sample`]. Non-zero
//! fault or context-switch deltas are not errors; they are the operator's signal that
//! the window was disturbed and the timing should be read with suspicion.

use std::fmt::{self, Display};
use std::time::Instant;

use os_noise::{ActivityDelta, Snapshot};

use crate::pal::cacheline;
use crate::{Region, Result, Scaled};

/// Whether this build can evict cache lines and honor the cold-start guarantee.
///
/// When `false` (a build target without an unprivileged line-invalidation instruction),
/// workloads start from whatever cache state the prologue walk left behind, and results
/// must be read with that caveat in mind.
pub const COLD_START_AVAILABLE: bool = cacheline::FLUSH_AVAILABLE;

/// An in-flight measurement: the prologue has run and the clock is live.
///
/// Created by [`Measurement::begin`] immediately before a workload is invoked and
/// consumed by [`Measurement::complete`] immediately after it returns. Holding the
/// prologue readings in this value (rather than in shared state) ties each epilogue to
/// exactly one prologue by construction.
#[derive(Debug)]
pub struct Measurement {
    usage_before: Snapshot,
    started: Instant,
}

impl Measurement {
    /// Prepares `region` for measurement and starts the clock.
    ///
    /// # Errors
    ///
    /// Fails only if the activity counters cannot be read, which is fatal for the run.
    pub fn begin(region: &mut Region) -> Result<Self> {
        prefault(region);

        let usage_before = Snapshot::capture()?;
        let started = Instant::now();

        Ok(Self {
            usage_before,
            started,
        })
    }

    /// Stops the clock, reads the closing counter snapshot and folds everything into a
    /// [`Sample`] labeled with the sweep parameter `step`.
    ///
    /// # Errors
    ///
    /// Fails only if the activity counters cannot be read, which is fatal for the run.
    pub fn complete(self, step: u64) -> Result<Sample> {
        let elapsed_us = self.started.elapsed().as_micros();
        let usage_after = Snapshot::capture()?;

        Ok(Sample {
            step: Scaled::new(step),
            elapsed_us,
            activity: usage_after.delta_since(&self.usage_before),
        })
    }
}

/// Writes to every page of the region and evicts each touched line.
///
/// The write is a volatile read-modify-write of the first byte of each page: volatile so
/// the store cannot be optimized away, read-modify-write so the page contents are
/// preserved. The eviction discards the line without writing it back.
fn prefault(region: &mut Region) {
    let page_size = region.page_size();
    let length = region.len();
    let base = region.as_mut_ptr();

    let mut offset = 0;
    while offset < length {
        // SAFETY: offset < length, so the address is inside the live mapping.
        let page = unsafe { base.add(offset) };

        // SAFETY: page points into a readable, writable, exclusively owned mapping.
        let value = unsafe { page.read_volatile() };

        // SAFETY: As above.
        unsafe { page.write_volatile(value) };

        cacheline::flush(page.cast_const());

        offset += page_size;
    }
}

/// One completed measurement: the sweep parameter, the elapsed wall-clock time and the
/// operating-system activity observed inside the timed window.
///
/// Renders as the fixed-width report line:
///
/// ```text
/// step:    1 , diff:  78525(us) hf:  0, sf  0, nvcs: 0, nivcs:  1
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    step: Scaled,
    elapsed_us: u128,
    activity: ActivityDelta,
}

impl Sample {
    /// The sweep parameter, scaled for display.
    #[must_use]
    pub fn step(&self) -> Scaled {
        self.step
    }

    /// Wall-clock time spent inside the measured window, in microseconds.
    #[must_use]
    pub fn elapsed_us(&self) -> u128 {
        self.elapsed_us
    }

    /// The fault and context-switch movement observed inside the measured window.
    #[must_use]
    pub fn activity(&self) -> ActivityDelta {
        self.activity
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step: {:4}{}, diff: {:6}(us) hf: {:2}, sf {:2}, nvcs: {:1}, nivcs: {:2}",
            self.step.value(),
            self.step.prefix(),
            self.elapsed_us,
            self.activity.major_faults(),
            self.activity.minor_faults(),
            self.activity.voluntary_switches(),
            self.activity.involuntary_switches(),
        )
    }
}
