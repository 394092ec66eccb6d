use std::ptr::NonNull;
use std::{io, mem, ptr};

use crate::pal::Bindings;

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

impl Bindings for BuildTargetBindings {
    fn sched_setaffinity_current(&self, processor: u32) -> Result<(), io::Error> {
        // SAFETY: All zeroes is a valid cpu_set_t.
        let mut cpuset: libc::cpu_set_t = unsafe { mem::zeroed() };

        // SAFETY: cpuset is a live value and the processor index is in range for it.
        unsafe { libc::CPU_SET(processor as usize, &mut cpuset) };

        // 0 means current process.
        // SAFETY: No safety requirements beyond passing valid arguments.
        let result = unsafe { libc::sched_setaffinity(0, size_of::<libc::cpu_set_t>(), &cpuset) };

        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn sched_max_priority_fifo(&self) -> Result<i32, io::Error> {
        // SAFETY: No safety requirements.
        let priority = unsafe { libc::sched_get_priority_max(libc::SCHED_FIFO) };

        if priority == -1 {
            Err(io::Error::last_os_error())
        } else {
            Ok(priority)
        }
    }

    fn sched_set_fifo_current(&self, priority: i32) -> Result<(), io::Error> {
        let param = libc::sched_param {
            sched_priority: priority,
        };

        // 0 means current process.
        // SAFETY: No safety requirements beyond passing valid arguments.
        let result = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };

        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn page_size(&self) -> usize {
        // SAFETY: No safety requirements.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

        usize::try_from(size).expect("the page size is a small positive integer on every target")
    }

    fn map_anonymous(&self, length: usize) -> Result<NonNull<u8>, io::Error> {
        // SAFETY: Requesting a fresh private anonymous mapping with no address hint has no
        // safety requirements; the kernel picks a free range.
        let address = unsafe {
            libc::mmap(
                ptr::null_mut(),
                length,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if address == libc::MAP_FAILED {
            Err(io::Error::last_os_error())
        } else {
            Ok(NonNull::new(address.cast())
                .expect("mmap reports failure through MAP_FAILED, never through a null mapping"))
        }
    }

    fn unmap(&self, address: NonNull<u8>, length: usize) -> Result<(), io::Error> {
        // SAFETY: The caller hands back exactly the address and length of a mapping
        // previously returned by map_anonymous().
        let result = unsafe { libc::munmap(address.as_ptr().cast(), length) };

        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
