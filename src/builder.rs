use std::thread;

use crate::error::Error;
use crate::pool::Pool;

/// Builder for configuring and starting a [`Pool`].
///
/// # Examples
///
/// ```rust,ignore
/// let pool = PoolBuilder::new()
///     .worker_threads(4)
///     .build()?;
/// ```
pub struct PoolBuilder {
    /// Number of worker threads in the pool.
    pub(crate) worker_threads: usize,

    /// Whether workers are pinned one-to-one to cores.
    pub(crate) pin_workers: bool,

    /// Whether the pool starts suspended.
    pub(crate) paused: bool,
}

impl PoolBuilder {
    /// Creates a new `PoolBuilder` with default configuration.
    ///
    /// By default the pool has one worker per available logical CPU
    /// (falling back to `1` if that cannot be determined), workers are
    /// pinned to cores best-effort, and dispatch starts immediately.
    pub fn new() -> Self {
        let worker_threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            worker_threads,
            pin_workers: true,
            paused: false,
        }
    }

    /// Sets the number of worker threads.
    ///
    /// The pool size is fixed for its whole lifetime; it is never
    /// resized afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn worker_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "worker_threads must be > 0");

        self.worker_threads = n;
        self
    }

    /// Enables or disables best-effort worker-to-core pinning.
    pub fn pin_workers(mut self, pin: bool) -> Self {
        self.pin_workers = pin;
        self
    }

    /// Starts the pool suspended.
    ///
    /// Workers are spawned but dispatch nothing until
    /// [`Pool::resume`] is called. Useful for staging work before any
    /// consumer runs.
    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Starts the pool with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StartupFailure`] if any worker thread fails to
    /// start; workers already started are stopped and joined before
    /// the error is returned. Returns [`Error::OutOfMemory`] if the
    /// default queue cannot be allocated.
    pub fn build(self) -> Result<Pool, Error> {
        Pool::start(self)
    }
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
