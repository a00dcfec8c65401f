//! Dispatch Queue
//!
//! An ordered multiset of runnable tasks, ascending by virtual time.
//! Ties are broken by insertion order via a monotonic sequence number,
//! so equal-vtime tasks come out FIFO.

use crate::error::{QueueId, SchedError, SchedResult};
use crate::task::Task;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use spin::Mutex;

struct QueueInner {
    /// Keyed (vtime, insertion sequence); BTreeMap pop_first is the
    /// minimum, which is exactly the dispatch order.
    tasks: BTreeMap<(u64, u64), Arc<Task>>,
    next_seq: u64,
}

/// A single dispatch queue, identified by a process-unique id
pub struct DispatchQueue {
    id: QueueId,
    inner: Mutex<QueueInner>,
}

impl DispatchQueue {
    /// Create a queue. Id zero is reserved.
    pub fn new(id: QueueId) -> SchedResult<Self> {
        if id == 0 {
            return Err(SchedError::InvalidQueueId { id });
        }
        Ok(Self {
            id,
            inner: Mutex::new(QueueInner {
                tasks: BTreeMap::new(),
                next_seq: 0,
            }),
        })
    }

    #[inline]
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Insert a task at its current virtual time.
    ///
    /// The vtime is sampled once here; later vtime changes do not
    /// reorder an already-queued task.
    pub fn push(&self, task: Arc<Task>) {
        let vtime = task.vtime();
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.tasks.insert((vtime, seq), task);
    }

    /// Remove and return the minimum-vtime task, FIFO among equals
    pub fn pop_min(&self) -> Option<Arc<Task>> {
        self.inner.lock().tasks.pop_first().map(|(_, task)| task)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, vtime: u64) -> Arc<Task> {
        let t = Task::new(id, "dsq-test");
        t.set_vtime(vtime);
        Arc::new(t)
    }

    #[test]
    fn test_rejects_reserved_id() {
        assert!(matches!(
            DispatchQueue::new(0),
            Err(SchedError::InvalidQueueId { id: 0 })
        ));
    }

    #[test]
    fn test_pop_min_orders_by_vtime() {
        let q = DispatchQueue::new(101).unwrap();
        q.push(task(1, 300));
        q.push(task(2, 100));
        q.push(task(3, 200));

        assert_eq!(q.pop_min().unwrap().id(), 2);
        assert_eq!(q.pop_min().unwrap().id(), 3);
        assert_eq!(q.pop_min().unwrap().id(), 1);
        assert!(q.pop_min().is_none());
    }

    #[test]
    fn test_equal_vtime_is_fifo() {
        let q = DispatchQueue::new(101).unwrap();
        for id in 0..8 {
            q.push(task(id, 50));
        }
        for id in 0..8 {
            assert_eq!(q.pop_min().unwrap().id(), id);
        }
    }

    #[test]
    fn test_vtime_sampled_at_insert() {
        let q = DispatchQueue::new(101).unwrap();
        let a = task(1, 10);
        let b = task(2, 20);
        q.push(a.clone());
        q.push(b);

        // Raising a's vtime after insertion does not reorder it
        a.set_vtime(1_000);
        assert_eq!(q.pop_min().unwrap().id(), 1);
    }
}
