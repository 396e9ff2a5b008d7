/// A unit of deferred work: a boxed callable plus whatever it captures.
///
/// A `WorkItem` is immutable once submitted. It is owned by the queue
/// it was appended to until a worker pops it; ownership then moves to
/// the executing worker, which consumes the item when running it.
/// Work is fire-and-forget: no result is returned to the submitter.
pub(crate) struct WorkItem {
    action: Box<dyn FnOnce() + Send + 'static>,
}

impl WorkItem {
    /// Wraps a callable into a work item.
    pub(crate) fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Box::new(action),
        }
    }

    /// Consumes the item and runs its action on the calling thread.
    pub(crate) fn run(self) {
        (self.action)();
    }
}
