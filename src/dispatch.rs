use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};

use crate::error::Error;
use crate::queue::handle::QueueHandle;
use crate::queue::item::WorkItem;
use crate::queue::registry::Registry;

/// The dispatch core shared by producers and workers.
///
/// One mutex guards the whole registry: queue membership and every
/// queue's item list. Coarse on purpose: the lock is only ever held
/// for a bounded scan of the registry, never across the execution of
/// an item, so a single lock keeps the create/destroy/submit/find
/// interleavings trivially correct.
///
/// A single condition variable is the wake channel every idle worker
/// blocks on. It is signaled by `submit` (wake at least one), by a
/// stop request, and by `resume` (wake all).
pub(crate) struct Dispatcher {
    /// All live queues plus the round-robin cursor. The dispatch lock.
    registry: Mutex<Registry>,

    /// Wake channel for workers with nothing to do.
    work_available: Condvar,

    /// Cooperative stop request. Checked before executing the next
    /// item and on every wakeup; never preempts a running item.
    stop: AtomicBool,

    /// Suspend signal. Paused workers stay blocked even while work is
    /// pending; checked at the same points as `stop`.
    paused: AtomicBool,
}

impl Dispatcher {
    pub(crate) fn new(start_paused: bool) -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
            work_available: Condvar::new(),
            stop: AtomicBool::new(false),
            paused: AtomicBool::new(start_paused),
        }
    }

    /// Registers a new empty queue.
    pub(crate) fn create_queue(&self) -> Result<QueueHandle, Error> {
        self.registry.lock().unwrap().create()
    }

    /// Removes a queue, discarding its pending items without running
    /// them.
    ///
    /// Serialized with `submit` by the dispatch lock: a concurrent
    /// submit either lands before the removal (and the item is
    /// discarded here) or observes `InvalidHandle` afterwards. An item
    /// can never be appended past the removal and leak.
    pub(crate) fn destroy_queue(&self, handle: QueueHandle) -> Result<(), Error> {
        self.registry.lock().unwrap().remove(handle)
    }

    /// Appends an item to the tail of the named queue, then wakes at
    /// least one blocked worker.
    ///
    /// Never blocks on a condition, only briefly on the lock. Extra
    /// wakeups are harmless; woken workers re-check under the lock.
    pub(crate) fn submit(&self, handle: QueueHandle, item: WorkItem) -> Result<(), Error> {
        self.registry.lock().unwrap().push(handle, item)?;
        self.work_available.notify_one();
        Ok(())
    }

    /// Blocks until an item is available or stop is requested.
    ///
    /// This is the searching/blocked half of the worker loop: scan the
    /// registry round-robin under the lock; when nothing is found,
    /// release the lock and wait on the wake channel. Wakeups may be
    /// spurious, so everything is re-checked on each pass.
    ///
    /// Returns `None` once stop has been requested.
    pub(crate) fn next_work(&self) -> Option<WorkItem> {
        let mut registry = self.registry.lock().unwrap();

        loop {
            if self.stop.load(Ordering::Acquire) {
                return None;
            }

            if !self.paused.load(Ordering::Acquire) {
                if let Some(item) = registry.find_work() {
                    return Some(item);
                }
            }

            registry = self.work_available.wait(registry).unwrap();
        }
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Requests cooperative stop and wakes every blocked worker.
    ///
    /// The store and notify happen under the dispatch lock. A worker
    /// holds that lock from its flag check until it enters the wait,
    /// so taking it here means the notification cannot land inside
    /// that window and get lost on a worker about to block.
    pub(crate) fn request_stop(&self) {
        let _registry = self.registry.lock().unwrap();
        self.stop.store(true, Ordering::Release);
        self.work_available.notify_all();
    }

    /// Suspends dispatch. Pending and newly submitted items stay
    /// queued until [`resume`](Self::resume).
    pub(crate) fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resumes dispatch and wakes every blocked worker.
    ///
    /// Locked for the same reason as [`request_stop`](Self::request_stop):
    /// a notify racing a worker's pre-wait check would otherwise be
    /// dropped and strand queued items until the next submission.
    pub(crate) fn resume(&self) {
        let _registry = self.registry.lock().unwrap();
        self.paused.store(false, Ordering::Release);
        self.work_available.notify_all();
    }

    /// Drops every remaining queue and its items, returning how many
    /// items were discarded. Only called after all workers stopped.
    pub(crate) fn clear(&self) -> usize {
        self.registry.lock().unwrap().clear()
    }
}
