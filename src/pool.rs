use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::builder::PoolBuilder;
use crate::dispatch::Dispatcher;
use crate::error::Error;
use crate::queue::handle::QueueHandle;
use crate::queue::item::WorkItem;
use crate::worker::Worker;

/// The work-queue thread pool.
///
/// A `Pool` owns:
/// - the dispatch core (registry of queues, dispatch lock, wake
///   channel),
/// - the default queue used by [`submit`](Self::submit),
/// - a fixed set of worker threads, one per configured slot.
///
/// Producers create queues, submit items to them, and destroy them
/// while workers run concurrently; everything serializes on one
/// coarse dispatch lock.
///
/// Dropping the pool shuts it down in an orderly fashion: stop is
/// requested, all workers are joined, and only then are the remaining
/// queues drained and destroyed.
pub struct Pool {
    /// Shared dispatch core.
    dispatcher: Arc<Dispatcher>,

    /// Queue used when the caller names no queue. Created before the
    /// workers, destroyed after them; its handle is never exposed.
    default_queue: QueueHandle,

    /// Join handles for worker threads.
    handles: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Starts the pool: creates the default queue, then spawns one
    /// named worker per configured slot.
    ///
    /// A worker that fails to spawn is fatal to the whole pool: the
    /// workers already running are stopped and joined, the default
    /// queue is torn down, and the first error is returned.
    pub(crate) fn start(config: PoolBuilder) -> Result<Self, Error> {
        let dispatcher = Arc::new(Dispatcher::new(config.paused));
        let default_queue = dispatcher.create_queue()?;

        let mut handles = Vec::with_capacity(config.worker_threads);

        for id in 0..config.worker_threads {
            let worker = Worker::new(id, dispatcher.clone());
            let pin = config.pin_workers;

            let spawned = thread::Builder::new()
                .name(format!("taskmill-worker/{id}"))
                .spawn(move || worker.run(pin));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    dispatcher.request_stop();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    dispatcher.clear();

                    return Err(Error::StartupFailure(err));
                }
            }
        }

        debug!(workers = handles.len(), "pool started");

        Ok(Self {
            dispatcher,
            default_queue,
            handles,
        })
    }

    /// Creates a new, empty work queue.
    ///
    /// The queue participates in round-robin dispatch as soon as it
    /// holds an item. It lives until [`destroy_queue`](Self::destroy_queue)
    /// or pool shutdown.
    pub fn create_queue(&self) -> Result<QueueHandle, Error> {
        let handle = self.dispatcher.create_queue()?;
        debug!(queue = handle.0, "queue created");
        Ok(handle)
    }

    /// Destroys a queue, discarding its pending items.
    ///
    /// Items still pending at this point are dropped without being
    /// executed; nothing from this queue runs once destruction has
    /// begun. Destruction serializes with concurrent submissions on
    /// the dispatch lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if the queue was already
    /// destroyed.
    pub fn destroy_queue(&self, handle: QueueHandle) -> Result<(), Error> {
        self.dispatcher.destroy_queue(handle)?;
        debug!(queue = handle.0, "queue destroyed");
        Ok(())
    }

    /// Submits work to the default queue.
    ///
    /// The item is appended at the tail and becomes immediately
    /// eligible for dispatch; at least one idle worker is woken. This
    /// never blocks waiting for a worker.
    pub fn submit<F>(&self, action: F) -> Result<(), Error>
    where
        F: FnOnce() + Send + 'static,
    {
        self.dispatcher.submit(self.default_queue, WorkItem::new(action))
    }

    /// Submits work to a specific queue.
    ///
    /// Items submitted to the same queue execute in submission order
    /// relative to each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if the queue was destroyed,
    /// [`Error::OutOfMemory`] if the item cannot be stored.
    pub fn submit_to<F>(&self, queue: QueueHandle, action: F) -> Result<(), Error>
    where
        F: FnOnce() + Send + 'static,
    {
        self.dispatcher.submit(queue, WorkItem::new(action))
    }

    /// Submits work with a requested delay.
    ///
    /// # Known limitation
    ///
    /// The `delay` is accepted for forward compatibility but is not
    /// honored: the item becomes eligible for dispatch immediately,
    /// exactly as with [`submit_to`](Self::submit_to).
    pub fn submit_delayed<F>(
        &self,
        queue: QueueHandle,
        delay: Duration,
        action: F,
    ) -> Result<(), Error>
    where
        F: FnOnce() + Send + 'static,
    {
        let _ = delay;
        self.submit_to(queue, action)
    }

    /// Suspends dispatch.
    ///
    /// Workers finish the item they are currently running, then block
    /// as if no work existed. Submissions still succeed and stay
    /// queued.
    pub fn pause(&self) {
        self.dispatcher.pause();
    }

    /// Resumes dispatch after [`pause`](Self::pause), or starts it for
    /// a pool built with [`PoolBuilder::paused`](crate::PoolBuilder::paused).
    pub fn resume(&self) {
        self.dispatcher.resume();
    }

    /// Number of worker threads in the pool.
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Shuts the pool down.
    ///
    /// Equivalent to dropping it, but explicit: requests stop, joins
    /// every worker (each finishes its in-flight item first), then
    /// drains and destroys all remaining queues, discarding their
    /// pending items.
    pub fn shutdown(self) {
        // Drop runs the actual teardown.
    }

    fn shutdown_inner(&mut self) {
        if self.handles.is_empty() {
            return;
        }

        self.dispatcher.request_stop();

        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }

        // Safe to drain only now: no worker can be holding a
        // reference into a queue anymore.
        let discarded = self.dispatcher.clear();

        debug!(discarded, "pool stopped");
    }
}

impl Drop for Pool {
    /// Shuts the pool down:
    /// 1. Request stop and wake every blocked worker
    /// 2. Join all workers (in-flight items run to completion)
    /// 3. Drain and destroy the remaining queues, default queue included
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}
