//! End-to-end measurements against the real platform, without real-time privileges.
//!
//! These tests exercise the public measurement surface the way the experiment drivers
//! do: map a region, bracket a workload with the harness, render the report line. They
//! run unpinned and at normal priority, so they assert structure - labels, counter
//! presence, workload effects - and never a timing trend.

use cache_cliffs::{Measurement, Region, workloads};

/// The stride experiment's working set: large enough that every stride pattern is
/// served from memory rather than from a warm cache.
const SCAN_REGION_BYTES: usize = 64 * 1024 * 1024;

#[test]
#[cfg(not(miri))] // Maps real memory and queries the real operating system.
fn unit_stride_scan_over_the_full_working_set() {
    let mut region =
        Region::anonymous(SCAN_REGION_BYTES).expect("a 64 MiB anonymous mapping succeeds");

    let measurement = Measurement::begin(&mut region).expect("counters are readable");
    workloads::strided_scan(region.elements_mut(), 1);
    let sample = measurement.complete(1).expect("counters are readable");

    // Every element was visited, so the zero-initialized buffer is still all zeroes -
    // the proof of the visit is the report line, not the data.
    let line = sample.to_string();
    assert!(line.starts_with("step:    1 , diff:"), "line was: {line}");
}

#[test]
#[cfg(not(miri))] // Maps real memory and queries the real operating system.
fn page_spanning_stride_scales_its_label() {
    let mut region =
        Region::anonymous(SCAN_REGION_BYTES).expect("a 64 MiB anonymous mapping succeeds");

    let measurement = Measurement::begin(&mut region).expect("counters are readable");
    workloads::strided_scan(region.elements_mut(), 4096);
    let sample = measurement.complete(4096).expect("counters are readable");

    // 4096 scales one step to the kilo prefix.
    assert_eq!(sample.step().to_string(), "4k");
    assert!(
        sample.to_string().starts_with("step:    4k, diff:"),
        "line was: {sample}"
    );
}

#[test]
#[cfg(not(miri))] // Maps real memory and queries the real operating system.
fn increment_contrast_leaves_the_documented_totals() {
    let mut region = Region::single_page().expect("one page always fits");

    let measurement = Measurement::begin(&mut region).expect("counters are readable");
    workloads::dependent_increments(region.elements_mut(), 100_000);
    let dependent = measurement.complete(1).expect("counters are readable");

    assert_eq!(region.elements_mut()[0], 200_000);

    let measurement = Measurement::begin(&mut region).expect("counters are readable");
    workloads::independent_increments(region.elements_mut(), 100_000);
    let independent = measurement.complete(2).expect("counters are readable");

    // The second probe distributed its increments over both elements of the pair.
    assert_eq!(region.elements_mut()[0], 300_000);
    assert_eq!(region.elements_mut()[1], 100_000);

    assert!(dependent.to_string().starts_with("step:    1 ,"));
    assert!(independent.to_string().starts_with("step:    2 ,"));
}
