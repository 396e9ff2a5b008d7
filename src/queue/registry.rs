use std::collections::VecDeque;

use crate::error::Error;
use crate::queue::handle::QueueHandle;
use crate::queue::item::WorkItem;

/// One live queue: its identity and its pending items, oldest first.
struct Queue {
    id: u64,
    items: VecDeque<WorkItem>,
}

/// The ordered set of all live queues, visited round-robin.
///
/// Queues keep their creation order; `cursor` is the rotation
/// position the next search starts from. A queue is a member of the
/// registry exactly as long as it is live: created and not yet
/// destroyed.
///
/// The registry holds no synchronization of its own. Every access
/// goes through the dispatch lock in
/// [`Dispatcher`](crate::dispatch::Dispatcher), which wraps the whole
/// registry in one mutex.
pub(crate) struct Registry {
    queues: Vec<Queue>,

    /// Index of the queue the next round-robin search starts at.
    cursor: usize,

    /// Next queue id. Monotonic, never reused.
    next_id: u64,
}

impl Registry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            queues: Vec::new(),
            cursor: 0,
            next_id: 0,
        }
    }

    /// Registers a new empty queue and returns its handle.
    ///
    /// On allocation failure nothing is registered.
    pub(crate) fn create(&mut self) -> Result<QueueHandle, Error> {
        self.queues.try_reserve(1)?;

        let id = self.next_id;
        self.next_id += 1;

        self.queues.push(Queue {
            id,
            items: VecDeque::new(),
        });

        Ok(QueueHandle(id))
    }

    /// Removes a queue, discarding its pending items without running them.
    pub(crate) fn remove(&mut self, handle: QueueHandle) -> Result<(), Error> {
        let pos = self.position(handle)?;
        self.queues.remove(pos);

        // Removal shifts everything after `pos` one slot left; keep
        // the cursor on the queue it pointed at before.
        if pos < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.queues.len() {
            self.cursor = 0;
        }

        Ok(())
    }

    /// Appends an item to the tail of the named queue.
    pub(crate) fn push(&mut self, handle: QueueHandle, item: WorkItem) -> Result<(), Error> {
        let pos = self.position(handle)?;

        let items = &mut self.queues[pos].items;
        items.try_reserve(1)?;
        items.push_back(item);

        Ok(())
    }

    /// Round-robin search for the next item to run.
    ///
    /// Scans the registry starting at the cursor and pops the head of
    /// the first non-empty queue. After a successful find the cursor
    /// advances past the queue that yielded work, so the next search
    /// starts at its successor. Over any window in which every queue
    /// receives at least one submission, each queue is therefore
    /// visited once before any queue is visited twice.
    ///
    /// Ties between non-empty queues are broken purely by rotation
    /// position; there is no cross-queue priority.
    ///
    /// Returns `None` when every queue is empty.
    pub(crate) fn find_work(&mut self) -> Option<WorkItem> {
        let len = self.queues.len();

        for i in 0..len {
            let pos = (self.cursor + i) % len;

            if let Some(item) = self.queues[pos].items.pop_front() {
                self.cursor = (pos + 1) % len;
                return Some(item);
            }
        }

        None
    }

    /// Drops every queue, discarding pending items without running
    /// them. Returns how many items were discarded.
    ///
    /// Only called on shutdown, after all workers have stopped.
    pub(crate) fn clear(&mut self) -> usize {
        let discarded = self.queues.iter().map(|q| q.items.len()).sum();

        self.queues.clear();
        self.cursor = 0;

        discarded
    }

    fn position(&self, handle: QueueHandle) -> Result<usize, Error> {
        self.queues
            .iter()
            .position(|q| q.id == handle.0)
            .ok_or(Error::InvalidHandle)
    }
}
