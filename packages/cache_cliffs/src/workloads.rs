//! Access-pattern workloads, each exercising one cache phenomenon.
//!
//! What a workload is measured for is the memory traffic it generates, not the values it
//! computes, so every element access goes through a volatile read or write. The
//! optimizer remains free to arrange the surrounding loop however it likes, but it can
//! neither eliminate the accesses nor hoist them across the timed boundary. The harness
//! and driver carry no such restrictions and optimize normally.
//!
//! All workloads operate on a buffer of unsigned 32-bit elements and use wrapping
//! arithmetic: overflow is meaningless here, only the traffic pattern counts.

/// Multiplies every `step`-th element of `buf` by 3.
///
/// With a step small enough that consecutive visits land in the same cache line this is
/// sequential, prefetch-friendly traffic and the run time tracks the number of lines
/// touched, not the number of elements. Once `step` spans more than a line every visit
/// pays for a fresh line, and past the page size for a fresh TLB entry as well - the
/// sweep shows stepped latency increases at those boundaries.
///
/// # Panics
///
/// Panics if `step` is zero.
pub fn strided_scan(buf: &mut [u32], step: usize) {
    assert!(step > 0, "a zero stride would never terminate");

    let base = buf.as_mut_ptr();
    let mut index = 0;
    while index < buf.len() {
        // SAFETY: index < buf.len() is checked by the loop condition.
        let element = unsafe { base.add(index) };

        // SAFETY: element points at a live, exclusively borrowed buffer element.
        let value = unsafe { element.read_volatile() };

        // SAFETY: As above.
        unsafe { element.write_volatile(value.wrapping_mul(3)) };

        index += step;
    }
}

/// Increments `buf[(i * 16) & (buf.len() - 1)]` for `i` in `0..iterations`.
///
/// The iteration count is independent of the buffer length, fixing the total work while
/// the working set varies: sweeping the buffer size across the last-level cache capacity
/// exposes the miss-rate cliff where the set no longer fits. The 16-element distance
/// keeps successive touches on distinct cache lines.
///
/// # Panics
///
/// Panics if the buffer length is not a power of two; the wrap-around relies on masking.
pub fn aliased_updates(buf: &mut [u32], iterations: usize) {
    assert!(
        buf.len().is_power_of_two(),
        "aliased updates wrap by masking, which needs a power-of-two length"
    );

    let base = buf.as_mut_ptr();
    let mask = buf.len() - 1;
    for i in 0..iterations {
        let index = i.wrapping_mul(16) & mask;

        // SAFETY: index is masked below buf.len(), which is a power of two.
        let element = unsafe { base.add(index) };

        // SAFETY: element points at a live, exclusively borrowed buffer element.
        let value = unsafe { element.read_volatile() };

        // SAFETY: As above.
        unsafe { element.write_volatile(value.wrapping_add(1)) };
    }
}

/// Performs two back-to-back increments of `buf[0]`, `count` times.
///
/// Each increment depends on the result of the previous one, so the processor cannot
/// overlap them. This is the dependent-operation baseline that
/// [`independent_increments`] is contrasted against.
///
/// # Panics
///
/// Panics if `buf` is empty.
pub fn dependent_increments(buf: &mut [u32], count: usize) {
    assert!(!buf.is_empty(), "the workload touches element 0");

    let element = buf.as_mut_ptr();
    for _ in 0..count {
        // SAFETY: element points at buf[0], which exists and is exclusively borrowed.
        let first = unsafe { element.read_volatile() };
        // SAFETY: As above.
        unsafe { element.write_volatile(first.wrapping_add(1)) };

        // SAFETY: As above.
        let second = unsafe { element.read_volatile() };
        // SAFETY: As above.
        unsafe { element.write_volatile(second.wrapping_add(1)) };
    }
}

/// Increments `buf[0]` and `buf[1]` in sequence, `count` times.
///
/// The two elements share a cache line but the increments carry no data dependency on
/// each other, so a pipelined processor can execute them in parallel. Comparing against
/// [`dependent_increments`] - same line, same instruction count - isolates the
/// instruction-level-parallelism gain.
///
/// # Panics
///
/// Panics if `buf` has fewer than two elements.
pub fn independent_increments(buf: &mut [u32], count: usize) {
    assert!(buf.len() >= 2, "the workload touches elements 0 and 1");

    let first = buf.as_mut_ptr();
    // SAFETY: buf.len() >= 2, so one past the first element is in bounds.
    let second = unsafe { first.add(1) };

    for _ in 0..count {
        // SAFETY: first points at buf[0], which exists and is exclusively borrowed.
        let a = unsafe { first.read_volatile() };
        // SAFETY: As above.
        unsafe { first.write_volatile(a.wrapping_add(1)) };

        // SAFETY: second points at buf[1], which exists and is exclusively borrowed.
        let b = unsafe { second.read_volatile() };
        // SAFETY: As above.
        unsafe { second.write_volatile(b.wrapping_add(1)) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_scan_multiplies_only_visited_elements() {
        let mut buf = vec![1_u32; 64];

        strided_scan(&mut buf, 16);

        for (index, element) in buf.iter().enumerate() {
            let expected = if index % 16 == 0 { 3 } else { 1 };
            assert_eq!(*element, expected, "element {index}");
        }
    }

    #[test]
    fn strided_scan_with_unit_step_visits_everything() {
        let mut buf = vec![2_u32; 100];

        strided_scan(&mut buf, 1);

        assert!(buf.iter().all(|&element| element == 6));
    }

    #[test]
    fn strided_scan_with_oversized_step_visits_only_the_first() {
        let mut buf = vec![1_u32; 8];

        strided_scan(&mut buf, 4096);

        assert_eq!(buf[0], 3);
        assert!(buf[1..].iter().all(|&element| element == 1));
    }

    #[test]
    #[should_panic(expected = "zero stride")]
    fn strided_scan_rejects_zero_step() {
        strided_scan(&mut [1, 2, 3], 0);
    }

    #[test]
    fn aliased_updates_follow_the_modular_sequence() {
        // Touched offsets cycle 0, 16, 32, 48; ten iterations leave the first two
        // offsets with three hits and the last two with two.
        let mut buf = vec![0_u32; 64];

        aliased_updates(&mut buf, 10);

        for (index, element) in buf.iter().enumerate() {
            let expected = match index {
                0 | 16 => 3,
                32 | 48 => 2,
                _ => 0,
            };
            assert_eq!(*element, expected, "offset {index}");
        }
    }

    #[test]
    fn aliased_updates_distribute_evenly_when_iterations_divide() {
        let mut buf = vec![0_u32; 64];

        aliased_updates(&mut buf, 4000);

        for offset in [0, 16, 32, 48] {
            assert_eq!(buf[offset], 1000, "offset {offset}");
        }
        assert_eq!(buf.iter().map(|&element| u64::from(element)).sum::<u64>(), 4000);
    }

    #[test]
    fn aliased_updates_collapse_onto_one_element_in_a_tiny_buffer() {
        // With sixteen elements every touch aliases to offset zero.
        let mut buf = vec![0_u32; 16];

        aliased_updates(&mut buf, 123);

        assert_eq!(buf[0], 123);
        assert!(buf[1..].iter().all(|&element| element == 0));
    }

    #[test]
    #[should_panic(expected = "power-of-two")]
    fn aliased_updates_reject_odd_lengths() {
        aliased_updates(&mut vec![0_u32; 48], 1);
    }

    #[test]
    fn dependent_increments_double_count_element_zero() {
        let mut buf = vec![0_u32; 2];

        dependent_increments(&mut buf, 1000);

        assert_eq!(buf[0], 2000);
        assert_eq!(buf[1], 0);
    }

    #[test]
    fn independent_increments_split_between_neighbors() {
        let mut buf = vec![0_u32; 2];

        independent_increments(&mut buf, 1000);

        assert_eq!(buf[0], 1000);
        assert_eq!(buf[1], 1000);
    }

    #[test]
    fn increment_counts_match_between_the_two_probes() {
        // Same total increment count, differently distributed - the whole point of the
        // dependent/independent contrast.
        let mut dependent = vec![0_u32; 2];
        let mut independent = vec![0_u32; 2];

        dependent_increments(&mut dependent, 500);
        independent_increments(&mut independent, 500);

        let dependent_total: u64 = dependent.iter().map(|&element| u64::from(element)).sum();
        let independent_total: u64 = independent.iter().map(|&element| u64::from(element)).sum();
        assert_eq!(dependent_total, independent_total);
    }
}
