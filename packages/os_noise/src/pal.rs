//! Platform Abstraction Layer (PAL) for the process activity counter queries.

mod abstractions;
pub(crate) use abstractions::*;

mod facade;
pub(crate) use facade::*;

mod real;
pub(crate) use real::*;
