use std::io;

use thiserror::Error;

use crate::ProcessorId;

/// Errors that can occur while preparing the measurement environment or running a sweep.
///
/// Every variant is fatal by design. A failed affinity pin, scheduling elevation or
/// mapping means the timing deltas would no longer be attributable to cache effects
/// alone, so the only honest response is to stop - retrying or falling back would
/// silently degrade measurement validity.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The process could not be bound to the requested logical processor.
    #[error("binding the process to processor {processor} failed: {source}")]
    Affinity {
        /// The processor the process was to be bound to.
        processor: ProcessorId,

        /// The underlying operating system error.
        #[source]
        source: io::Error,
    },

    /// The process could not be raised to the real-time scheduling class.
    #[error("elevating to real-time scheduling priority failed: {source}")]
    Scheduling {
        /// The underlying operating system error.
        #[source]
        source: io::Error,
    },

    /// The operating system refused to provide an anonymous memory mapping.
    #[error("mapping a {length} byte anonymous region failed: {source}")]
    RegionMap {
        /// The requested mapping length in bytes.
        length: usize,

        /// The underlying operating system error.
        #[source]
        source: io::Error,
    },

    /// The process activity counters could not be read.
    #[error(transparent)]
    UsageQuery(#[from] os_noise::Error),

    /// A report line could not be written to the output stream.
    #[error("writing report output failed: {source}")]
    Report {
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A specialized `Result` type for sweep operations, returning the crate's [`Error`]
/// type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn affinity_error_names_the_processor() {
        let error = Error::Affinity {
            processor: 3,
            source: io::Error::from_raw_os_error(libc::EINVAL),
        };

        assert!(error.to_string().contains("processor 3"));
    }

    #[test]
    fn region_map_error_names_the_length() {
        let error = Error::RegionMap {
            length: 65536,
            source: io::Error::from_raw_os_error(libc::ENOMEM),
        };

        assert!(error.to_string().contains("65536 byte"));
    }
}
