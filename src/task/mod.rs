//! Task subsystem
//!
//! Per-task scheduling record and lifecycle state machine. The host
//! owns the task; the policy only reads and mutates the scheduling
//! fields.

pub mod record;
pub mod state;

pub use record::{CpuId, Task, TaskId};
pub use state::{validate_transition, AtomicTaskState, TaskState};
