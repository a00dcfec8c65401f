//! Virtual Time Clock
//!
//! Process-wide fairness counter. Tasks that consume less of their
//! slice accrue less virtual time and come back to the CPU sooner,
//! approximating shortest-job-first from observed execution alone.

use crate::task::Task;
use core::sync::atomic::{AtomicU64, Ordering};

/// Wraparound-safe ordering: treats the u64 counter as circular.
#[inline]
pub fn vtime_before(a: u64, b: u64) -> bool {
    (a.wrapping_sub(b) as i64) < 0
}

/// Global virtual time, advanced only forward
#[derive(Debug)]
pub struct VirtualClock {
    vtime_now: AtomicU64,
}

impl VirtualClock {
    pub const fn new() -> Self {
        Self {
            vtime_now: AtomicU64::new(0),
        }
    }

    /// Current clock value
    #[inline]
    pub fn now(&self) -> u64 {
        self.vtime_now.load(Ordering::Relaxed)
    }

    /// Advance the clock as a task starts executing.
    ///
    /// The test and update may race across CPUs; a lost update is
    /// contained and temporary since later observations keep converging
    /// toward the maximum. Tolerated, not a defect.
    pub fn advance_on_start(&self, task: &Task) {
        let observed = task.vtime();
        if vtime_before(self.vtime_now.load(Ordering::Relaxed), observed) {
            self.vtime_now.store(observed, Ordering::Relaxed);
        }
    }

    /// Charge a task for its run as it comes off the CPU.
    ///
    /// The charge is the slice it actually used: a full default slice
    /// minus whatever budget the host left in the task. Returns the
    /// charged amount. `remaining_slice` never exceeds the default
    /// slice while the host upholds its side of the contract.
    pub fn charge_on_stop(&self, task: &Task, slice_dfl_ns: u64) -> u64 {
        let used = slice_dfl_ns.saturating_sub(task.remaining_slice());
        task.add_vtime(used);
        used
    }

    /// Baseline a newly admitted task at the current fairness frontier.
    ///
    /// Joining at `vtime_now` means no penalty for being new and no
    /// advantage over tasks that already paid for CPU time.
    pub fn baseline_on_admit(&self, task: &Task) {
        task.set_vtime(self.now());
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;

    fn task(id: u64) -> Arc<Task> {
        Arc::new(Task::new(id, "clock-test"))
    }

    #[test]
    fn test_vtime_before_plain() {
        assert!(vtime_before(1, 2));
        assert!(!vtime_before(2, 1));
        assert!(!vtime_before(7, 7));
    }

    #[test]
    fn test_vtime_before_wraparound() {
        // Near-overflow values still compare as "earlier"
        assert!(vtime_before(u64::MAX - 5, 3));
        assert!(!vtime_before(3, u64::MAX - 5));
    }

    #[test]
    fn test_advance_takes_max() {
        let clock = VirtualClock::new();
        let t = task(1);
        t.set_vtime(500);
        clock.advance_on_start(&t);
        assert_eq!(clock.now(), 500);

        // A task behind the clock does not move it backward
        t.set_vtime(100);
        clock.advance_on_start(&t);
        assert_eq!(clock.now(), 500);
    }

    #[test]
    fn test_charge_zero_consumed_is_full_slice() {
        // remaining_slice stays at its initial zero when a task never
        // actually ran: it is charged the full default slice.
        let clock = VirtualClock::new();
        let t = task(2);
        let charged = clock.charge_on_stop(&t, 20_000_000);
        assert_eq!(charged, 20_000_000);
        assert_eq!(t.vtime(), 20_000_000);
    }

    #[test]
    fn test_charge_partial_slice() {
        let clock = VirtualClock::new();
        let t = task(3);
        t.set_remaining_slice(15_000_000);
        let charged = clock.charge_on_stop(&t, 20_000_000);
        assert_eq!(charged, 5_000_000);
        assert_eq!(t.vtime(), 5_000_000);
    }

    #[test]
    fn test_baseline_joins_frontier() {
        let clock = VirtualClock::new();
        let running = task(4);
        running.set_vtime(1_000);
        clock.advance_on_start(&running);

        let fresh = task(5);
        clock.baseline_on_admit(&fresh);
        assert_eq!(fresh.vtime(), 1_000);
    }
}
