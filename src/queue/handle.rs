/// Opaque identifier for a live work queue.
///
/// Handles are cheap to copy and stay valid until the queue is
/// destroyed with [`Pool::destroy_queue`](crate::Pool::destroy_queue).
/// Operating on a destroyed queue is reported as
/// [`Error::InvalidHandle`](crate::Error::InvalidHandle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueHandle(pub(crate) u64);
