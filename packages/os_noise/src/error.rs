use thiserror::Error;

/// Errors that can occur when reading the process activity counters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operating system rejected the resource-usage query.
    ///
    /// There is no meaningful recovery from this - if the counters cannot be read, nothing
    /// can be said about the quality of a measurement window.
    #[error("resource usage query failed: {source}")]
    UsageQuery {
        /// The underlying operating system error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized `Result` type for activity counter operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
