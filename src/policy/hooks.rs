//! Hook Interface
//!
//! The callback table the host scheduling subsystem invokes at each
//! lifecycle point, as a polymorphic trait. Hooks are synchronous and
//! bounded: none of them may block or sleep except `init`, which runs
//! once before activation completes and may perform blocking setup.

use super::exit::ExitInfo;
use crate::error::SchedResult;
use crate::task::{CpuId, Task};
use alloc::sync::Arc;
use bitflags::bitflags;

bitflags! {
    /// Flags the host passes with a wakeup-time CPU selection
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WakeFlags: u64 {
        /// Waker expects to sleep soon after this wakeup
        const SYNC = 1 << 0;
        /// Task is waking for the first time after fork
        const FORK = 1 << 1;
        /// Task is waking after exec
        const EXEC = 1 << 2;
    }
}

bitflags! {
    /// Flags the host passes with an enqueue
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EnqueueFlags: u64 {
        /// Enqueue is part of a wakeup
        const WAKEUP = 1 << 0;
        /// Task was preempted off the CPU
        const PREEMPT = 1 << 1;
        /// Task is being re-enqueued without having run
        const REENQUEUE = 1 << 2;
    }
}

/// Scheduling policy hook table.
///
/// Invoked from parallel execution units; implementations keep their
/// shared state behind atomics or short critical sections.
pub trait SchedPolicy: Send + Sync {
    /// Pick the CPU a waking task should run on. Pure: no side effects
    /// beyond the selection itself.
    fn select_cpu(&self, task: &Arc<Task>, prev_cpu: CpuId, wake_flags: WakeFlags) -> CpuId;

    /// Place a runnable task into exactly one dispatch queue. A task
    /// this hook fails to route is lost to scheduling.
    fn enqueue(&self, task: &Arc<Task>, flags: EnqueueFlags);

    /// Pull at most one task for the CPU to run next. `prev` is the
    /// task coming off the CPU, if any.
    fn dispatch(&self, cpu: CpuId, prev: Option<&Arc<Task>>) -> Option<Arc<Task>>;

    /// A dispatched task started executing.
    fn running(&self, task: &Arc<Task>);

    /// A task came off the CPU. `runnable` tells whether it goes back
    /// to a queue or leaves the scheduler.
    fn stopping(&self, task: &Arc<Task>, runnable: bool);

    /// First-time activation of a task: baseline its virtual time.
    fn enable(&self, task: &Arc<Task>);

    /// One-time activation. All-or-nothing: any failure aborts the
    /// whole activation and is reported as a status code.
    fn init(&self) -> SchedResult<()>;

    /// Record why the engine deactivated.
    fn exit(&self, info: ExitInfo);
}
