//! Host simulator
//!
//! Stands in for the host scheduling subsystem: drives the hook table
//! the way the host would, owns the tasks, and maintains each task's
//! slice budget (grant at run start, burn while "executing"). The
//! policy under test never touches the budget itself.

use sjf_sched::{
    CpuId, EnqueueFlags, SchedConfig, SchedPolicy, SjfScheduler, Task, TaskId, WakeFlags,
};
use std::sync::Arc;

pub struct HostSim {
    pub sched: SjfScheduler,
    pub cpu: CpuId,
    next_id: TaskId,
}

impl HostSim {
    pub fn new() -> Self {
        Self::with_config(SchedConfig::new())
    }

    pub fn with_config(cfg: SchedConfig) -> Self {
        let sched = SjfScheduler::new(cfg);
        sched.init().expect("activation failed");
        Self {
            sched,
            cpu: cfg.target_cpu,
            next_id: 1,
        }
    }

    /// Admit a task and make it runnable
    pub fn admit(&mut self, name: &str) -> Arc<Task> {
        let task = Arc::new(Task::new(self.next_id, name));
        self.next_id += 1;

        self.sched.enable(&task);
        let cpu = self.sched.select_cpu(&task, 0, WakeFlags::empty());
        task.set_assigned_cpu(cpu);
        self.sched.enqueue(&task, EnqueueFlags::WAKEUP);
        task
    }

    /// Dispatch the next task and run it for `consume_ns` of its
    /// slice. A task that stays runnable goes straight back into a
    /// queue, as the host would after a preemption.
    pub fn run_next(
        &mut self,
        prev: Option<&Arc<Task>>,
        consume_ns: u64,
        still_runnable: bool,
    ) -> Option<Arc<Task>> {
        let task = self.sched.dispatch(self.cpu, prev)?;
        self.sched.running(&task);

        // Host side: grant a fresh slice, then burn part of it
        task.set_remaining_slice(self.sched.config().slice_ns);
        task.consume_slice(consume_ns);

        self.sched.stopping(&task, still_runnable);
        if still_runnable {
            self.sched.enqueue(&task, EnqueueFlags::empty());
        }
        Some(task)
    }

    /// Monitor behavior on engine exit: reload with fully reset state
    /// for a restart reason, otherwise stop.
    pub fn reload_on_restart(&self) -> Option<SjfScheduler> {
        let info = self.sched.exit_info()?;
        if !info.is_restart() {
            return None;
        }
        let fresh = SjfScheduler::new(*self.sched.config());
        fresh.init().expect("reload failed");
        Some(fresh)
    }
}
