//! The experiment drivers: fixed parameter sweeps around the harness and workloads.
//!
//! Every sweep bound and iteration count is a build-time constant - there is no runtime
//! configuration surface, by design. An operator correlates the cliffs in this output
//! against the cache topology reported by a separate enumeration utility; nothing here
//! consumes that information programmatically.

use std::io::{self, Write};
use std::iter::successors;
use std::num::NonZero;

use new_zealand::nz;

use crate::error::Error;
use crate::{Measurement, Region, Result, harness, workloads};

/// Working set of the stride sweep. Far larger than any last-level cache, so every
/// stride pattern is served from memory rather than from a warm cache.
const STRIDE_REGION_BYTES: usize = 64 * 1024 * 1024;

/// Largest stride swept, in elements. Past the page size in bytes, so the sweep crosses
/// both the line boundary and the page boundary.
const STRIDE_LAST: u64 = 4096;

/// Smallest and largest working-set sizes of the capacity sweep, in bytes.
const WORKING_SET_FIRST_BYTES: NonZero<u64> = nz!(1024);
const WORKING_SET_LAST_BYTES: u64 = 1024 * 1024 * 1024;

/// Update count of the capacity sweep; fixed so total work is constant while the
/// working-set size varies.
const ALIASED_ITERATIONS: usize = 64 * 1024 * 1024;

/// Iteration count of the instruction-level-parallelism probes.
const ILP_ITERATIONS: usize = 256 * 1024 * 1024;

/// Runs every experiment in order against `out`.
///
/// # Errors
///
/// Any operating-system resource failure aborts the run immediately; regions already
/// mapped are unmapped on the way out.
pub fn run_all(out: &mut impl Write) -> Result<()> {
    if !harness::COLD_START_AVAILABLE {
        writeln!(
            out,
            "note: cache-line invalidation is unavailable on this target; \
             workloads start from an uncontrolled cache state"
        )
        .map_err(report)?;
    }

    cache_line_impact(out)?;
    capacity_cliffs(out)?;
    instruction_parallelism(out)?;

    out.flush().map_err(report)?;

    Ok(())
}

/// Strided scans over a fixed working set, doubling the stride each step.
///
/// While the stride stays within a cache line, doubling it halves the element count but
/// barely moves the run time: the line count, not the element count, is what is paid
/// for. Once the stride exceeds the line size the run time tracks the stride, and past
/// the page size the TLB joins in.
///
/// # Errors
///
/// Fatal on any operating-system resource failure.
pub fn cache_line_impact(out: &mut impl Write) -> Result<()> {
    cache_line_impact_sweep(out, STRIDE_REGION_BYTES, nz!(1), STRIDE_LAST)
}

fn cache_line_impact_sweep(
    out: &mut impl Write,
    region_bytes: usize,
    first_step: NonZero<u64>,
    last_step: u64,
) -> Result<()> {
    writeln!(out, "\nExample 2: Impact of cache lines").map_err(report)?;

    // Only the stride varies in this sweep, so one mapping serves all of it.
    let mut region = Region::anonymous(region_bytes)?;
    for step in doubling(first_step, last_step) {
        let measurement = Measurement::begin(&mut region)?;
        workloads::strided_scan(region.elements_mut(), sweep_value_as_usize(step));
        let sample = measurement.complete(step)?;
        writeln!(out, "{sample}").map_err(report)?;
    }

    Ok(())
}

/// Fixed-work aliased updates over a doubling working-set size.
///
/// The update count is constant, so run time is flat until the working set outgrows a
/// cache level - each such boundary shows up as a cliff.
///
/// # Errors
///
/// Fatal on any operating-system resource failure.
pub fn capacity_cliffs(out: &mut impl Write) -> Result<()> {
    capacity_cliffs_sweep(
        out,
        WORKING_SET_FIRST_BYTES,
        WORKING_SET_LAST_BYTES,
        ALIASED_ITERATIONS,
    )
}

fn capacity_cliffs_sweep(
    out: &mut impl Write,
    first_bytes: NonZero<u64>,
    last_bytes: u64,
    iterations: usize,
) -> Result<()> {
    writeln!(out, "\nExample 3: L1 and L2 cache sizes").map_err(report)?;

    for bytes in doubling(first_bytes, last_bytes) {
        // A fresh mapping per size keeps residual cache warmth of one iteration out of
        // the next; the region unmaps at the end of the iteration, before the next maps.
        let mut region = Region::anonymous(sweep_value_as_usize(bytes))?;
        let measurement = Measurement::begin(&mut region)?;
        workloads::aliased_updates(region.elements_mut(), iterations);
        let sample = measurement.complete(bytes)?;
        writeln!(out, "{sample}").map_err(report)?;
    }

    Ok(())
}

/// The dependent/independent increment contrast over a single page.
///
/// Both probes execute the same number of increments against the same cache line; the
/// second distributes them over two addresses with no data dependency, letting the
/// pipeline overlap them. Reported as steps 1 and 2.
///
/// # Errors
///
/// Fatal on any operating-system resource failure.
pub fn instruction_parallelism(out: &mut impl Write) -> Result<()> {
    instruction_parallelism_runs(out, ILP_ITERATIONS)
}

fn instruction_parallelism_runs(out: &mut impl Write, iterations: usize) -> Result<()> {
    writeln!(out, "\nExample 4: Instruction-level parallelism").map_err(report)?;

    let mut region = Region::single_page()?;

    let measurement = Measurement::begin(&mut region)?;
    workloads::dependent_increments(region.elements_mut(), iterations);
    let sample = measurement.complete(1)?;
    writeln!(out, "{sample}").map_err(report)?;

    let measurement = Measurement::begin(&mut region)?;
    workloads::independent_increments(region.elements_mut(), iterations);
    let sample = measurement.complete(2)?;
    writeln!(out, "{sample}").map_err(report)?;

    Ok(())
}

/// The geometric (doubling) sweep over a closed parameter range.
fn doubling(first: NonZero<u64>, last: u64) -> impl Iterator<Item = u64> {
    successors(Some(first.get()), |&value| value.checked_mul(2))
        .take_while(move |&value| value <= last)
}

fn sweep_value_as_usize(value: u64) -> usize {
    usize::try_from(value).expect("sweep bounds are build-time constants far below usize::MAX")
}

fn report(source: io::Error) -> Error {
    Error::Report { source }
}
