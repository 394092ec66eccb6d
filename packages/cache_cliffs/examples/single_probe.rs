//! Brackets a single workload with the measurement harness, by hand.
//!
//! The `cache_cliffs` binary pins the process to one processor and elevates it to the
//! real-time scheduling class before sweeping, which needs privileges. This example
//! skips that step, so the numbers are noisier - good for seeing the moving parts, not
//! for drawing conclusions about the cache hierarchy.
//!
//! Run with: `cargo run --release --example single_probe`.

use cache_cliffs::{Error, Measurement, Region, workloads};

/// Large enough that a unit-stride scan leaves the innermost cache levels.
const REGION_BYTES: usize = 16 * 1024 * 1024;

fn main() -> Result<(), Error> {
    println!("=== Single Probe Example ===");
    println!("(unpinned and at normal priority - expect noise)");
    println!();

    let mut region = Region::anonymous(REGION_BYTES)?;

    for step in [1, 16, 256] {
        let measurement = Measurement::begin(&mut region)?;
        workloads::strided_scan(region.elements_mut(), step);
        let sample = measurement.complete(step as u64)?;

        println!("{sample}");
    }

    Ok(())
}
