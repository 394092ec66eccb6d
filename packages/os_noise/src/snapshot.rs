use crate::pal::{Bindings, BindingsFacade};
use crate::{Error, Result};

/// A point-in-time reading of the process-wide activity counters.
///
/// Capture one snapshot immediately before a timed measurement window and one immediately
/// after, then ask for the [`delta_since`][Self::delta_since] between them. The counters
/// are cumulative over the life of the process, so the individual readings are rarely
/// interesting on their own.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Snapshot {
    major_faults: u64,
    minor_faults: u64,
    voluntary_switches: u64,
    involuntary_switches: u64,
}

impl Snapshot {
    /// Reads the current counter values from the operating system.
    ///
    /// # Errors
    ///
    /// Fails if the operating system rejects the resource-usage query. There is no retry
    /// logic - a failed query means the measurement environment itself is untrustworthy.
    pub fn capture() -> Result<Self> {
        Self::capture_with(&BindingsFacade::target())
    }

    pub(crate) fn capture_with(bindings: &BindingsFacade) -> Result<Self> {
        let usage = bindings
            .getrusage_self()
            .map_err(|source| Error::UsageQuery { source })?;

        Ok(Self {
            major_faults: counter(usage.ru_majflt),
            minor_faults: counter(usage.ru_minflt),
            voluntary_switches: counter(usage.ru_nvcsw),
            involuntary_switches: counter(usage.ru_nivcsw),
        })
    }

    /// Counter movement between `earlier` and this snapshot.
    ///
    /// The counters only ever grow, so a later snapshot minus an earlier one is the
    /// activity that occurred in between. Subtraction saturates rather than panicking if
    /// the caller swaps the operands.
    #[must_use]
    pub fn delta_since(&self, earlier: &Self) -> ActivityDelta {
        ActivityDelta {
            major_faults: self.major_faults.saturating_sub(earlier.major_faults),
            minor_faults: self.minor_faults.saturating_sub(earlier.minor_faults),
            voluntary_switches: self
                .voluntary_switches
                .saturating_sub(earlier.voluntary_switches),
            involuntary_switches: self
                .involuntary_switches
                .saturating_sub(earlier.involuntary_switches),
        }
    }

    /// Page faults that required reading a page in from backing storage.
    #[must_use]
    pub fn major_faults(&self) -> u64 {
        self.major_faults
    }

    /// Page faults satisfied without any I/O (e.g. first touch of an anonymous page).
    #[must_use]
    pub fn minor_faults(&self) -> u64 {
        self.minor_faults
    }

    /// Context switches the process asked for, e.g. by blocking on a resource.
    #[must_use]
    pub fn voluntary_switches(&self) -> u64 {
        self.voluntary_switches
    }

    /// Context switches imposed on the process, e.g. preemption at the end of a timeslice.
    #[must_use]
    pub fn involuntary_switches(&self) -> u64 {
        self.involuntary_switches
    }
}

/// The counter movement between two [`Snapshot`] values.
///
/// All four counters at zero means the window between the snapshots ran undisturbed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActivityDelta {
    major_faults: u64,
    minor_faults: u64,
    voluntary_switches: u64,
    involuntary_switches: u64,
}

impl ActivityDelta {
    /// Major page faults that occurred between the two snapshots.
    #[must_use]
    pub fn major_faults(&self) -> u64 {
        self.major_faults
    }

    /// Minor page faults that occurred between the two snapshots.
    #[must_use]
    pub fn minor_faults(&self) -> u64 {
        self.minor_faults
    }

    /// Voluntary context switches that occurred between the two snapshots.
    #[must_use]
    pub fn voluntary_switches(&self) -> u64 {
        self.voluntary_switches
    }

    /// Involuntary context switches that occurred between the two snapshots.
    #[must_use]
    pub fn involuntary_switches(&self) -> u64 {
        self.involuntary_switches
    }
}

/// The rusage counters are C longs for historical reasons but can never be negative.
#[expect(
    clippy::cast_sign_loss,
    reason = "the kernel never reports negative event counts"
)]
fn counter(value: libc::c_long) -> u64 {
    value as u64
}
