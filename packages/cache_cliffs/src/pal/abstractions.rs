use std::fmt::Debug;
use std::io;
use std::ptr::NonNull;

/// Bindings for FFI calls into the operating system.
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
///
/// Unlike most bindings layers this one is not `Send`/`Sync`: mapped addresses flow
/// through it, and the whole measurement core is single-threaded by construction.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + 'static {
    // sched_setaffinity() for the current process, restricted to a single processor
    fn sched_setaffinity_current(&self, processor: u32) -> Result<(), io::Error>;

    // sched_get_priority_max(SCHED_FIFO)
    fn sched_max_priority_fifo(&self) -> Result<i32, io::Error>;

    // sched_setscheduler(SCHED_FIFO) for the current process
    fn sched_set_fifo_current(&self, priority: i32) -> Result<(), io::Error>;

    fn page_size(&self) -> usize;

    // mmap() of a private anonymous readable/writable region
    fn map_anonymous(&self, length: usize) -> Result<NonNull<u8>, io::Error>;

    // munmap() of a region previously returned by map_anonymous()
    fn unmap(&self, address: NonNull<u8>, length: usize) -> Result<(), io::Error>;
}
