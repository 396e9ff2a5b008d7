//! Work queues and their registry.
//!
//! This module contains the passive data side of the pool:
//! - [`item::WorkItem`] — one unit of deferred work,
//! - [`handle::QueueHandle`] — the opaque token naming a live queue,
//! - [`registry::Registry`] — the ordered set of live queues plus the
//!   round-robin rotation cursor.
//!
//! Nothing here synchronizes by itself; all access is funneled
//! through the dispatch lock owned by [`crate::dispatch::Dispatcher`].

pub(crate) mod handle;
pub(crate) mod item;
pub(crate) mod registry;
