//! # Taskmill
//!
//! **Taskmill** is a deliberately simple deferred-work thread pool:
//! independently created work queues feed a fixed set of worker
//! threads, with round-robin dispatch across queues and FIFO order
//! within each queue.
//!
//! Unlike general-purpose executors, Taskmill keeps exactly one lock:
//! a single coarse dispatch lock guards the queue registry and every
//! queue's item list. Lock hold times stay bounded by a scan of the
//! registry, never by the execution of an item, which keeps the
//! create/submit/destroy interleavings easy to reason about at the
//! cost of raw scalability.
//!
//! Taskmill offers:
//!
//! - **Independent queues** — created and destroyed at any time while
//!   workers run; destroying a queue discards its pending items
//!   without running them
//! - **Round-robin fairness** — each search for work resumes past the
//!   queue that last yielded an item, so no heavily-loaded queue can
//!   starve the others
//! - **A fixed worker pool** — one worker per core by default, pinned
//!   best-effort, sized once at startup
//! - **Cooperative shutdown** — in-flight items always run to
//!   completion; remaining queues are drained only after every worker
//!   has stopped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use taskmill::PoolBuilder;
//!
//! let pool = PoolBuilder::new().worker_threads(4).build()?;
//!
//! let logs = pool.create_queue()?;
//! pool.submit_to(logs, || println!("deferred"))?;
//! pool.submit(|| println!("on the default queue"))?;
//!
//! pool.shutdown();
//! ```
//!
//! ## Modules
//!
//! - [`Pool`] / [`PoolBuilder`] — pool lifecycle and submission API
//! - [`QueueHandle`] — opaque token naming a live queue
//! - [`Error`] — everything that can go wrong

mod builder;
mod dispatch;
mod error;
mod pool;
mod queue;
mod worker;

pub use builder::PoolBuilder;
pub use error::Error;
pub use pool::Pool;
pub use queue::handle::QueueHandle;
