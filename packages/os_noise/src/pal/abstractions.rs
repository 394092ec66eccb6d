use std::fmt::Debug;
use std::io;

/// Bindings for FFI calls into the operating system.
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    // getrusage(RUSAGE_SELF) for the current process
    fn getrusage_self(&self) -> Result<libc::rusage, io::Error>;
}
