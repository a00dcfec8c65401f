//! SJF Policy Engine
//!
//! Ties the virtual clock, the dual-queue router, the history store
//! and the counters together behind the hook table. "Shortest job
//! first" is approximated from observed execution: tasks that used
//! less of their slice carry less virtual time and win the next
//! dispatch. The stored predicted runtime never enters the decision.

use super::exit::ExitInfo;
use super::hooks::{EnqueueFlags, SchedPolicy, WakeFlags};
use crate::clock::VirtualClock;
use crate::config::SchedConfig;
use crate::dsq::DualQueueRouter;
use crate::error::{SchedError, SchedResult};
use crate::prediction::JobHistory;
use crate::stats::{Counter, StatsCounters, StatsSnapshot};
use crate::task::{CpuId, Task, TaskState};
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::{Mutex, Once};

/// Engine lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum EngineState {
    Uninitialized = 0,
    Ready = 1,
    Exited = 2,
}

impl EngineState {
    fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::Uninitialized),
            1 => Some(Self::Ready),
            2 => Some(Self::Exited),
            _ => None,
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Ready => write!(f, "Ready"),
            Self::Exited => write!(f, "Exited"),
        }
    }
}

struct AtomicEngineState {
    state: AtomicU64,
}

impl AtomicEngineState {
    const fn new(state: EngineState) -> Self {
        Self {
            state: AtomicU64::new(state as u64),
        }
    }

    fn load(&self) -> EngineState {
        EngineState::from_u64(self.state.load(Ordering::Acquire))
            .unwrap_or(EngineState::Uninitialized)
    }

    fn store(&self, state: EngineState) {
        self.state.store(state as u64, Ordering::Release);
    }

    fn compare_exchange(
        &self,
        current: EngineState,
        new: EngineState,
    ) -> Result<(), EngineState> {
        self.state
            .compare_exchange(
                current as u64,
                new as u64,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|actual| {
                EngineState::from_u64(actual).unwrap_or(EngineState::Uninitialized)
            })
    }
}

/// Virtual-time SJF scheduling policy engine
pub struct SjfScheduler {
    cfg: SchedConfig,
    clock: VirtualClock,
    /// Built during init; absent means activation never completed
    router: Once<DualQueueRouter>,
    history: JobHistory,
    stats: StatsCounters,
    state: AtomicEngineState,
    exit_info: Mutex<Option<ExitInfo>>,
    /// Tasks that reached enqueue while the engine could not route
    /// them. Any nonzero value here is a defect to chase, not noise.
    lost_tasks: AtomicU64,
}

impl SjfScheduler {
    /// Create an engine; call `init` before driving any other hook
    pub fn new(cfg: SchedConfig) -> Self {
        Self {
            cfg,
            clock: VirtualClock::new(),
            router: Once::new(),
            history: JobHistory::new(cfg.history_capacity),
            stats: StatsCounters::new(),
            state: AtomicEngineState::new(EngineState::Uninitialized),
            exit_info: Mutex::new(None),
            lost_tasks: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn config(&self) -> &SchedConfig {
        &self.cfg
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state.load()
    }

    /// Aggregated counters for the external monitor
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Recorded exit reason, if the engine has exited
    pub fn exit_info(&self) -> Option<ExitInfo> {
        self.exit_info.lock().clone()
    }

    /// Tasks dropped at enqueue; nonzero means a routing defect
    pub fn lost_tasks(&self) -> u64 {
        self.lost_tasks.load(Ordering::Relaxed)
    }

    /// Current virtual clock value
    pub fn clock_now(&self) -> u64 {
        self.clock.now()
    }

    /// Queue depths, active queue first; zeros before activation
    pub fn queue_depths(&self) -> [usize; 2] {
        self.router.get().map_or([0, 0], DualQueueRouter::depths)
    }

    /// Per-task execution history store
    pub fn history(&self) -> &JobHistory {
        &self.history
    }

    #[inline]
    fn is_ready(&self) -> bool {
        self.state.load() == EngineState::Ready
    }
}

impl SchedPolicy for SjfScheduler {
    fn select_cpu(&self, task: &Arc<Task>, _prev_cpu: CpuId, _wake_flags: WakeFlags) -> CpuId {
        match self.router.get() {
            Some(router) => router.select_target_cpu(task),
            None => self.cfg.target_cpu,
        }
    }

    fn enqueue(&self, task: &Arc<Task>, flags: EnqueueFlags) {
        let Some(router) = self.router.get().filter(|_| self.is_ready()) else {
            // A task we cannot route is lost to scheduling entirely.
            self.lost_tasks.fetch_add(1, Ordering::Relaxed);
            log::error!(
                "[SCHED] task {} ({}) lost at enqueue: engine {}",
                task.id(),
                task.name(),
                self.state.load()
            );
            return;
        };

        log::trace!(
            "[SCHED] enqueue task {} vtime={} flags={:?}",
            task.id(),
            task.vtime(),
            flags
        );
        router.route_on_enqueue(Arc::clone(task));

        let from = task.state();
        if let Err(e) = task.try_transition(from, TaskState::Queued) {
            log::warn!("[SCHED] {}", e);
        }
    }

    fn dispatch(&self, cpu: CpuId, prev: Option<&Arc<Task>>) -> Option<Arc<Task>> {
        let router = self.router.get().filter(|_| self.is_ready())?;
        let task = router.pull_on_dispatch()?;

        self.stats.inc(Counter::Dispatched, cpu);
        if prev.map(|p| p.id()) != Some(task.id()) {
            self.stats.inc(Counter::Switches, cpu);
        }

        task.set_assigned_cpu(cpu);
        if let Err(e) = task.try_transition(TaskState::Queued, TaskState::Running) {
            log::warn!("[SCHED] {}", e);
        }
        Some(task)
    }

    fn running(&self, task: &Arc<Task>) {
        if !self.is_ready() {
            return;
        }
        self.clock.advance_on_start(task);
        self.stats.inc(Counter::Started, task.assigned_cpu());

        if let Err(e) = self.history.note_started(task.id(), self.clock.now()) {
            log::debug!("[SCHED] history: {}", e);
        }
    }

    fn stopping(&self, task: &Arc<Task>, runnable: bool) {
        if !self.is_ready() {
            return;
        }
        let used = self.clock.charge_on_stop(task, self.cfg.slice_ns);
        self.stats.inc(Counter::Stopped, task.assigned_cpu());

        if let Err(e) = self.history.observe_runtime(task.id(), used) {
            log::debug!("[SCHED] history: {}", e);
        }

        let target = if runnable {
            TaskState::Queued
        } else {
            TaskState::Terminated
        };
        let from = task.state();
        if let Err(e) = task.try_transition(from, target) {
            log::warn!("[SCHED] {}", e);
        }
    }

    fn enable(&self, task: &Arc<Task>) {
        if !self.is_ready() {
            log::warn!(
                "[SCHED] enable for task {} refused: engine {}",
                task.id(),
                self.state.load()
            );
            return;
        }
        self.clock.baseline_on_admit(task);
        if let Err(e) = task.try_transition(TaskState::New, TaskState::Admitted) {
            log::warn!("[SCHED] {}", e);
        }
    }

    fn init(&self) -> SchedResult<()> {
        self.cfg.validate()?;

        // Build both queues before anything becomes visible: a failure
        // here leaves the engine exactly as it was.
        let router = DualQueueRouter::new(&self.cfg)?;
        self.router.call_once(|| router);

        self.state
            .compare_exchange(EngineState::Uninitialized, EngineState::Ready)
            .map_err(|_| SchedError::AlreadyInitialized)?;

        log::info!(
            "[SCHED] activated: slice={}ns cpu={} queues={:?} partial={}",
            self.cfg.slice_ns,
            self.cfg.target_cpu,
            self.cfg.queue_ids,
            self.cfg.switch_partial
        );
        Ok(())
    }

    fn exit(&self, info: ExitInfo) {
        log::info!("[SCHED] exit: {}", info);
        *self.exit_info.lock() = Some(info);
        self.state.store(EngineState::Exited);
    }
}
