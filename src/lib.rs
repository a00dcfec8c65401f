//! Virtual-time SJF scheduling policy
//!
//! A pluggable CPU scheduling policy: a hook table a host scheduling
//! subsystem invokes at admission, enqueue, dispatch, run start, run
//! stop and exit, deciding which runnable task receives the CPU next.
//!
//! - Fairness comes from a process-wide virtual clock: a task is
//!   charged the share of its slice it actually used, so short jobs
//!   drift ahead without any predicted-runtime input.
//! - Runnable tasks sit in one of two vtime-ordered dispatch queues;
//!   arrivals buffer in the queue the consumer is not draining.
//! - Hooks never block and run from parallel execution units; shared
//!   state is atomics plus short spin-guarded sections.
//!
//! The host owns task lifecycles. This crate only reads and mutates
//! the scheduling fields of the tasks it is handed.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod clock;
pub mod config;
pub mod dsq;
pub mod error;
pub mod policy;
pub mod prediction;
pub mod stats;
pub mod task;

// Re-exports
pub use policy::{
    EngineState, EnqueueFlags, ExitInfo, ExitKind, SchedPolicy, SjfScheduler, WakeFlags,
};
pub use clock::{vtime_before, VirtualClock};
pub use config::{
    SchedConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_QUEUE_IDS, DEFAULT_SLICE_NS,
    DEFAULT_TARGET_CPU,
};
pub use dsq::{DispatchQueue, DualQueueRouter};
pub use error::{QueueId, SchedError, SchedResult};
pub use prediction::{JobHistory, JobInfo, RuntimeEma};
pub use stats::{Counter, StatsCounters, StatsSnapshot, NR_COUNTERS};
pub use task::{CpuId, Task, TaskId, TaskState};
