//! Microbenchmarks that surface CPU cache hierarchy effects through controlled
//! memory-access sweeps.
//!
//! The interesting part of this crate is not the workloads - each is a handful of
//! volatile memory operations - but the discipline around them. A timing delta in the
//! tens of microseconds only says something about caches if the confounders are pinned
//! down first:
//!
//! - [`Environment::claim_processor`] binds the process to one logical processor and
//!   elevates it to the real-time scheduling class, so neither core migration nor
//!   preemption pollutes the window. Failure to do either is fatal, never worked around.
//! - [`Measurement::begin`] pre-faults every page of the region under test and evicts
//!   the touched lines from the whole cache hierarchy, so the workload neither pays
//!   page-fault latency inside the window nor inherits cache warmth from the setup.
//! - [`Measurement::complete`] pairs the elapsed time with the page-fault and
//!   context-switch deltas observed across the window, so a disturbed measurement is
//!   visible in the report line instead of silently wrong.
//!
//! The [`workloads`] are written so the optimizer can neither eliminate nor reorder the
//! measured accesses; the [`experiments`] sweep them over doubling parameter ranges and
//! emit one fixed-width report line per step.
//!
//! # Example
//!
//! Bracketing one workload by hand (the full sweeps live in [`experiments`]; claiming a
//! processor is left out here because it needs real-time scheduling privileges):
//!
//! ```rust
//! use cache_cliffs::{Measurement, Region, workloads};
//!
//! # fn main() -> Result<(), cache_cliffs::Error> {
//! let mut region = Region::anonymous(1024 * 1024)?;
//!
//! let measurement = Measurement::begin(&mut region)?;
//! workloads::strided_scan(region.elements_mut(), 16);
//! let sample = measurement.complete(16)?;
//!
//! println!("{sample}");
//! # Ok(())
//! # }
//! ```
//!
//! # Caveats
//!
//! Measurements are only as controlled as the platform allows: on build targets without
//! an unprivileged cache-line invalidation instruction
//! ([`COLD_START_AVAILABLE`] is `false`) workloads start from whatever cache state the
//! pre-faulting walk left behind, and the sweeps say so in their output.

mod environment;
mod error;
pub mod experiments;
mod harness;
mod pal;
mod region;
mod scale;
pub mod workloads;

pub use environment::*;
pub use error::*;
pub use harness::*;
pub use region::*;
pub use scale::*;
