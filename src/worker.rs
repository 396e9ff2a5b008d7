use std::sync::Arc;

use tracing::trace;

use crate::dispatch::Dispatcher;

/// A worker thread in the pool.
///
/// Each worker repeatedly pulls one item from the dispatcher,
/// blocking while nothing is pending, and runs it to completion on
/// its own thread. There is no further concurrency inside a single
/// item.
///
/// The loop is:
/// 1. Ask the dispatcher for the next item (searching/blocked)
/// 2. Run it (running)
/// 3. Re-check the stop request, then go back to 1 (or stop)
///
/// Stop is cooperative: it is observed between items and while
/// blocked, never in the middle of an item. An item that has started
/// always finishes.
pub(crate) struct Worker {
    /// Index of this worker within the pool, also its target core.
    id: usize,

    /// Shared dispatch core.
    dispatcher: Arc<Dispatcher>,
}

impl Worker {
    pub(crate) fn new(id: usize, dispatcher: Arc<Dispatcher>) -> Self {
        Self { id, dispatcher }
    }

    /// Runs the worker loop until stop is requested.
    ///
    /// When `pin` is set, the thread is bound to core `id` first.
    /// Binding is best-effort: on machines with fewer cores than
    /// workers, or where affinity is unsupported, the worker simply
    /// runs unpinned.
    pub(crate) fn run(&self, pin: bool) {
        if pin {
            self.bind_to_core();
        }

        trace!(worker = self.id, "worker started");

        while let Some(item) = self.dispatcher.next_work() {
            item.run();

            if self.dispatcher.stop_requested() {
                break;
            }
        }

        trace!(worker = self.id, "worker stopped");
    }

    fn bind_to_core(&self) {
        if let Some(cores) = core_affinity::get_core_ids() {
            if let Some(core) = cores.get(self.id) {
                core_affinity::set_for_current(*core);
            }
        }
    }
}
