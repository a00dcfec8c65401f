//! Dispatch queue subsystem
//!
//! Ordered holding areas for runnable tasks plus the dual-queue router
//! that separates the queue being drained from the queue receiving new
//! arrivals.

pub mod queue;
pub mod router;

pub use queue::DispatchQueue;
pub use router::DualQueueRouter;
