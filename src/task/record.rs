//! Task Record
//!
//! The per-task scheduling state this policy reads and mutates. All
//! fields are atomics: hooks for the same task may fire from parallel
//! execution units, and the host's preemption path updates the
//! remaining slice concurrently with `stopping`.

use super::state::{validate_transition, AtomicTaskState, TaskState};
use crate::error::{SchedError, SchedResult};
use alloc::string::String;
use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Task ID type (stable numeric identity)
pub type TaskId = u64;

/// CPU identifier
pub type CpuId = u32;

/// Per-task scheduling record
#[derive(Debug)]
pub struct Task {
    /// Stable numeric id
    id: TaskId,

    /// Human-readable name, diagnostics only. Identity is the id:
    /// distinct tasks may share a name.
    name: String,

    /// Fairness ordering key
    vtime: AtomicU64,

    /// Time budget left in the current run (nanoseconds). Maintained
    /// by the host; the policy only reads it at stop time.
    remaining_slice: AtomicU64,

    /// CPU this task was routed to
    assigned_cpu: AtomicU32,

    /// Lifecycle state
    state: AtomicTaskState,
}

impl Task {
    /// Create a new task record, not yet admitted
    pub fn new(id: TaskId, name: &str) -> Self {
        Self {
            id,
            name: String::from(name),
            vtime: AtomicU64::new(0),
            remaining_slice: AtomicU64::new(0),
            assigned_cpu: AtomicU32::new(0),
            state: AtomicTaskState::new(TaskState::New),
        }
    }

    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current virtual time
    #[inline]
    pub fn vtime(&self) -> u64 {
        self.vtime.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_vtime(&self, vtime: u64) {
        self.vtime.store(vtime, Ordering::Relaxed);
    }

    /// Accrue virtual time (wrapping: the clock domain is circular)
    #[inline]
    pub fn add_vtime(&self, delta: u64) {
        self.vtime.fetch_add(delta, Ordering::Relaxed);
    }

    /// Remaining slice budget in nanoseconds
    #[inline]
    pub fn remaining_slice(&self) -> u64 {
        self.remaining_slice.load(Ordering::Relaxed)
    }

    /// Host-side: refill the slice budget at run start
    #[inline]
    pub fn set_remaining_slice(&self, ns: u64) {
        self.remaining_slice.store(ns, Ordering::Relaxed);
    }

    /// Host-side: burn slice budget as the task executes. Saturates at
    /// zero so a forced preemption racing this update stays bounded.
    pub fn consume_slice(&self, ns: u64) {
        let mut current = self.remaining_slice.load(Ordering::Relaxed);
        loop {
            let next = current.saturating_sub(ns);
            match self.remaining_slice.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    #[inline]
    pub fn assigned_cpu(&self) -> CpuId {
        self.assigned_cpu.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_assigned_cpu(&self, cpu: CpuId) {
        self.assigned_cpu.store(cpu, Ordering::Relaxed);
    }

    /// Current lifecycle state
    #[inline]
    pub fn state(&self) -> TaskState {
        self.state.load()
    }

    /// Attempt a validated state transition
    pub fn try_transition(&self, from: TaskState, to: TaskState) -> SchedResult<()> {
        if !validate_transition(from, to) {
            return Err(SchedError::InvalidStateTransition {
                task: self.id,
                from,
                to,
            });
        }
        self.state
            .compare_exchange(from, to)
            .map(|_| ())
            .map_err(|actual| SchedError::InvalidStateTransition {
                task: self.id,
                from: actual,
                to,
            })
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let t = Task::new(42, "worker");
        assert_eq!(t.id(), 42);
        assert_eq!(t.name(), "worker");
        assert_eq!(t.vtime(), 0);
        assert_eq!(t.remaining_slice(), 0);
        assert_eq!(t.state(), TaskState::New);
    }

    #[test]
    fn test_slice_accounting() {
        let t = Task::new(1, "burner");
        t.set_remaining_slice(10_000);
        t.consume_slice(4_000);
        assert_eq!(t.remaining_slice(), 6_000);

        // Saturates rather than wrapping under a racy over-consume
        t.consume_slice(100_000);
        assert_eq!(t.remaining_slice(), 0);
    }

    #[test]
    fn test_transition_guard() {
        let t = Task::new(2, "guarded");
        assert!(t.try_transition(TaskState::New, TaskState::Admitted).is_ok());
        assert_eq!(t.state(), TaskState::Admitted);

        let err = t
            .try_transition(TaskState::Admitted, TaskState::Running)
            .unwrap_err();
        assert!(matches!(err, SchedError::InvalidStateTransition { .. }));
        assert_eq!(t.state(), TaskState::Admitted);
    }
}
