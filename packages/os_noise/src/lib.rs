//! Accounting of operating-system activity that disturbs fine-grained timing measurements.
//!
//! A timed measurement window is only trustworthy if the process was not interrupted while
//! the clock was running. This crate captures the process-wide counters that reveal such
//! interruptions - major and minor page faults, voluntary and involuntary context switches -
//! as an explicit [`Snapshot`] value, and computes the movement between two snapshots as an
//! [`ActivityDelta`].
//!
//! The counters are cumulative for the life of the process, so a non-zero delta across a
//! measurement window means the window was disturbed. Interpreting how much disturbance is
//! tolerable is the caller's job; this crate only reports the numbers.
//!
//! # Example
//!
//! ```rust
//! use os_noise::Snapshot;
//!
//! # fn main() -> Result<(), os_noise::Error> {
//! let before = Snapshot::capture()?;
//!
//! // ... the timed work happens here ...
//!
//! let after = Snapshot::capture()?;
//! let activity = after.delta_since(&before);
//!
//! if activity.involuntary_switches() > 0 {
//!     println!("measurement was preempted - treat the timing with suspicion");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod pal;
mod snapshot;

pub use error::*;
pub use snapshot::*;
