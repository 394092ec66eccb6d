use std::{io, mem};

use crate::pal::Bindings;

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

impl Bindings for BuildTargetBindings {
    fn getrusage_self(&self) -> Result<libc::rusage, io::Error> {
        // SAFETY: All-zero is a valid initial value for this type.
        let mut usage: libc::rusage = unsafe { mem::zeroed() };

        // SAFETY: We are passing a valid pointer to a live value, no other requirements.
        let result = unsafe { libc::getrusage(libc::RUSAGE_SELF, &raw mut usage) };

        if result == 0 {
            Ok(usage)
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
