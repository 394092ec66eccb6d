//! Platform Abstraction Layer (PAL) for the operating-system calls the measurement
//! environment depends on: processor affinity, real-time scheduling and anonymous
//! memory mappings.
//!
//! The cache-line invalidation primitive lives in [`cacheline`] rather than behind the
//! bindings trait: it is an instruction-set capability, not an operating-system service,
//! and it sits on the hot path of the measurement prologue.

mod abstractions;
pub(crate) use abstractions::*;

mod facade;
pub(crate) use facade::*;

mod real;
pub(crate) use real::*;

pub(crate) mod cacheline;
