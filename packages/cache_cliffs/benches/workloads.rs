//! Benchmarks the access-pattern probes against each other.
//!
//! These are meta-benchmarks: the probes are themselves measurement routines, and this
//! harness is a quick way to eyeball their relative cost without the full sweep driver.

#![allow(missing_docs, reason = "benchmarks do not require API documentation")]

use std::hint::black_box;

use cache_cliffs::workloads;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn access_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("workloads");

    // A mebibyte's worth of elements; enough to leave the innermost cache levels.
    let mut scan_buffer = vec![0_u32; 262_144];

    for step in [1_usize, 16, 256] {
        group.bench_with_input(BenchmarkId::new("strided_scan", step), &step, |b, &step| {
            b.iter(|| workloads::strided_scan(black_box(&mut scan_buffer), step));
        });
    }

    let mut alias_buffer = vec![0_u32; 16_384];
    group.bench_with_input(
        BenchmarkId::new("aliased_updates", alias_buffer.len()),
        &(),
        |b, ()| {
            b.iter(|| workloads::aliased_updates(black_box(&mut alias_buffer), 16_384));
        },
    );

    let mut pair = vec![0_u32; 16];
    group.bench_with_input(BenchmarkId::new("dependent_increments", 4096), &(), |b, ()| {
        b.iter(|| workloads::dependent_increments(black_box(&mut pair), 4096));
    });
    group.bench_with_input(
        BenchmarkId::new("independent_increments", 4096),
        &(),
        |b, ()| {
            b.iter(|| workloads::independent_increments(black_box(&mut pair), 4096));
        },
    );

    group.finish();
}

criterion_group!(benches, access_patterns);
criterion_main!(benches);
