//! Job History Store
//!
//! Capacity-bounded map from task id to its execution history. Keyed
//! by the stable numeric id: keying by name would collide for
//! unrelated tasks sharing a name.
//!
//! Eviction rule: reject-when-full. Entries persist for the engine's
//! lifetime; a full store refuses new ids, counts the rejection, and
//! keeps serving existing entries.

use super::ema::RuntimeEma;
use crate::error::{SchedError, SchedResult};
use crate::task::TaskId;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::HashMap;
use spin::Mutex;

/// Execution history for one task
#[derive(Debug, Clone, Copy, Default)]
pub struct JobInfo {
    /// EMA over observed slice consumption
    ema: RuntimeEma,

    /// Virtual-clock stamp of the most recent run start
    pub last_start: u64,
}

impl JobInfo {
    /// Smoothed runtime estimate. Stored on every run, consulted by
    /// nothing in the dispatch path.
    pub fn predicted_run_time_ns(&self) -> u64 {
        self.ema.predict()
    }

    /// Runs folded into the estimate
    pub fn samples(&self) -> u64 {
        self.ema.sample_count()
    }
}

/// Bounded per-task history store
pub struct JobHistory {
    entries: Mutex<HashMap<TaskId, JobInfo>>,
    capacity: usize,
    rejected: AtomicU64,
}

impl JobHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
            rejected: AtomicU64::new(0),
        }
    }

    /// Stamp a run start for this task
    pub fn note_started(&self, id: TaskId, now: u64) -> SchedResult<()> {
        self.upsert(id, |info| info.last_start = now)
    }

    /// Fold an observed runtime into the task's estimate
    pub fn observe_runtime(&self, id: TaskId, runtime_ns: u64) -> SchedResult<()> {
        self.upsert(id, |info| info.ema.update(runtime_ns))
    }

    /// Look up a task's history
    pub fn get(&self, id: TaskId) -> Option<JobInfo> {
        self.entries.lock().get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Upserts refused because the store was full
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    fn upsert(&self, id: TaskId, apply: impl FnOnce(&mut JobInfo)) -> SchedResult<()> {
        let mut entries = self.entries.lock();
        if let Some(info) = entries.get_mut(&id) {
            apply(info);
            return Ok(());
        }
        if entries.len() >= self.capacity {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(SchedError::HistoryFull {
                capacity: self.capacity,
            });
        }
        let info = entries.entry(id).or_default();
        apply(info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_creates_then_updates() {
        let history = JobHistory::new(16);
        history.note_started(7, 100).unwrap();
        history.observe_runtime(7, 5_000).unwrap();

        let info = history.get(7).unwrap();
        assert_eq!(info.last_start, 100);
        assert_eq!(info.predicted_run_time_ns(), 5_000);
        assert_eq!(info.samples(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_distinct_ids_do_not_collide() {
        // Two tasks with the same name are distinct entries by id
        let history = JobHistory::new(16);
        history.observe_runtime(1, 1_000).unwrap();
        history.observe_runtime(2, 9_000).unwrap();

        assert_eq!(history.get(1).unwrap().predicted_run_time_ns(), 1_000);
        assert_eq!(history.get(2).unwrap().predicted_run_time_ns(), 9_000);
    }

    #[test]
    fn test_reject_when_full() {
        let history = JobHistory::new(2);
        history.observe_runtime(1, 100).unwrap();
        history.observe_runtime(2, 200).unwrap();

        let err = history.observe_runtime(3, 300).unwrap_err();
        assert!(matches!(err, SchedError::HistoryFull { capacity: 2 }));
        assert_eq!(history.rejected(), 1);
        assert!(history.get(3).is_none());

        // Existing entries still update after rejection
        history.observe_runtime(1, 100).unwrap();
        assert_eq!(history.get(1).unwrap().samples(), 2);
    }
}
