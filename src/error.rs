use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Errors reported by pool and queue operations.
///
/// Every failure is surfaced synchronously to the operation that
/// caused it; nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage for a queue or a work item could not be allocated.
    #[error("out of memory")]
    OutOfMemory,

    /// A worker thread failed to start.
    ///
    /// This is fatal to pool initialization: workers that did start
    /// are stopped and joined, and the default queue is torn down,
    /// before the error is returned.
    #[error("worker thread failed to start")]
    StartupFailure(#[source] io::Error),

    /// The handle does not name a live queue.
    ///
    /// Returned when operating on a queue that has already been
    /// destroyed. Queue ids are never reused, so a stale handle can
    /// never silently alias a younger queue.
    #[error("invalid queue handle")]
    InvalidHandle,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}
