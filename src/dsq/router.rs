//! Dual Dispatch Queue Router
//!
//! Two queues and a selector: new arrivals always land in the queue
//! that is *not* being drained, the consumer only drains the active
//! queue. Keeping producers and the consumer on different queues is
//! what the two-phase buffering discipline buys.
//!
//! Swap rule: the selector flips only when the consumer finds the
//! active queue exhausted and the buffering queue holds work. A
//! never-flipping selector would leave one queue permanently inert
//! (see DESIGN.md for the record of this decision).

use super::queue::DispatchQueue;
use crate::config::SchedConfig;
use crate::error::{SchedError, SchedResult};
use crate::task::{CpuId, Task};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Routes runnable tasks between two dispatch queues
pub struct DualQueueRouter {
    queues: [DispatchQueue; 2],
    /// Index of the queue currently being drained
    active: AtomicUsize,
    /// The single CPU this policy serves
    target_cpu: CpuId,
}

impl DualQueueRouter {
    /// Create both queues, all-or-nothing. A failure on either queue
    /// (reserved id, duplicate id) fails the whole router and nothing
    /// is left half-built.
    pub fn new(cfg: &SchedConfig) -> SchedResult<Self> {
        let [first_id, second_id] = cfg.queue_ids;
        let first = DispatchQueue::new(first_id)?;
        if second_id == first_id {
            return Err(SchedError::QueueIdInUse { id: second_id });
        }
        let second = DispatchQueue::new(second_id)?;
        Ok(Self {
            queues: [first, second],
            active: AtomicUsize::new(0),
            target_cpu: cfg.target_cpu,
        })
    }

    /// CPU selection: v1 serves exactly one core
    #[inline]
    pub fn select_target_cpu(&self, _task: &Task) -> CpuId {
        self.target_cpu
    }

    /// Insert a task into the buffering (non-active) queue at its
    /// current virtual time.
    pub fn route_on_enqueue(&self, task: Arc<Task>) {
        let buffering = 1 - self.active.load(Ordering::Acquire);
        self.queues[buffering].push(task);
    }

    /// Pop the minimum-vtime task from the active queue. When the
    /// active queue is exhausted the roles flip and the promoted queue
    /// is drained instead.
    ///
    /// An arrival racing the flip lands in whichever queue its enqueue
    /// sampled as buffering; either way it stays in exactly one queue
    /// and surfaces within one swap cycle.
    pub fn pull_on_dispatch(&self) -> Option<Arc<Task>> {
        let active = self.active.load(Ordering::Acquire);
        if let Some(task) = self.queues[active].pop_min() {
            return Some(task);
        }

        let buffering = 1 - active;
        if self.queues[buffering].is_empty() {
            return None;
        }

        // Lost CAS means another consumer already flipped; drain the
        // promoted queue either way.
        let _ = self.active.compare_exchange(
            active,
            buffering,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        self.queues[self.active.load(Ordering::Acquire)].pop_min()
    }

    /// Queue depths, active queue first
    pub fn depths(&self) -> [usize; 2] {
        let active = self.active.load(Ordering::Acquire);
        [self.queues[active].len(), self.queues[1 - active].len()]
    }
}
