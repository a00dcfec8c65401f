//! State - Task state machine
//!
//! Manages task lifecycle and state transitions as seen by the policy

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Task state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum TaskState {
    /// Task exists but has not been admitted yet
    New = 0,

    /// Task admitted, virtual time baselined
    Admitted = 1,

    /// Task routed into a dispatch queue
    Queued = 2,

    /// Task currently holds the CPU
    Running = 3,

    /// Task has left the scheduler
    Terminated = 4,
}

impl TaskState {
    /// Convert from u64
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::New),
            1 => Some(Self::Admitted),
            2 => Some(Self::Queued),
            3 => Some(Self::Running),
            4 => Some(Self::Terminated),
            _ => None,
        }
    }

    /// Convert to u64
    pub fn to_u64(self) -> u64 {
        self as u64
    }

    /// Check if the task can still receive CPU time
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Terminated)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::Admitted => write!(f, "Admitted"),
            Self::Queued => write!(f, "Queued"),
            Self::Running => write!(f, "Running"),
            Self::Terminated => write!(f, "Terminated"),
        }
    }
}

/// Atomic task state
#[derive(Debug)]
pub struct AtomicTaskState {
    state: AtomicU64,
}

impl AtomicTaskState {
    /// Create new atomic state
    pub const fn new(state: TaskState) -> Self {
        Self {
            state: AtomicU64::new(state as u64),
        }
    }

    /// Load current state
    pub fn load(&self) -> TaskState {
        let value = self.state.load(Ordering::Acquire);
        TaskState::from_u64(value).unwrap_or(TaskState::New)
    }

    /// Store new state
    pub fn store(&self, state: TaskState) {
        self.state.store(state as u64, Ordering::Release);
    }

    /// Compare and exchange state
    pub fn compare_exchange(
        &self,
        current: TaskState,
        new: TaskState,
    ) -> Result<TaskState, TaskState> {
        match self.state.compare_exchange(
            current as u64,
            new as u64,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(old) => Ok(TaskState::from_u64(old).unwrap_or(TaskState::New)),
            Err(actual) => Err(TaskState::from_u64(actual).unwrap_or(TaskState::New)),
        }
    }
}

/// Validate state transition
pub fn validate_transition(from: TaskState, to: TaskState) -> bool {
    use TaskState::*;

    match (from, to) {
        // New -> Admitted (enable hook)
        (New, Admitted) => true,

        // Admitted -> Queued (first enqueue)
        (Admitted, Queued) => true,

        // Queued -> Queued (re-route after a stop)
        (Queued, Queued) => true,

        // Queued -> Running (dispatch)
        (Queued, Running) => true,

        // Running -> Queued (stopped, still runnable)
        (Running, Queued) => true,

        // Running -> Terminated
        (Running, Terminated) => true,

        // Host-driven teardown of a task that never reached the CPU
        (Admitted, Terminated) => true,
        (Queued, Terminated) => true,

        // All other transitions invalid
        _ => false,
    }
}
