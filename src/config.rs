//! Scheduling Parameters
//!
//! Startup-time configuration for the policy engine. Everything here is
//! fixed once `init` succeeds; there is no runtime retuning.

use crate::error::{QueueId, SchedError, SchedResult};
use crate::task::CpuId;

/// Default time slice granted per run (20ms)
pub const DEFAULT_SLICE_NS: u64 = 20_000_000;

/// Default target CPU served by the policy
pub const DEFAULT_TARGET_CPU: CpuId = 3;

/// Default dispatch queue ids
pub const DEFAULT_QUEUE_IDS: [QueueId; 2] = [101, 102];

/// Default job history capacity
pub const DEFAULT_HISTORY_CAPACITY: usize = 4096;

/// Policy engine parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedConfig {
    /// Time slice granted per run, in nanoseconds
    pub slice_ns: u64,

    /// The single CPU this policy serves (v1 serves exactly one core)
    pub target_cpu: CpuId,

    /// Ids of the two dispatch queues; must be distinct and nonzero
    pub queue_ids: [QueueId; 2],

    /// Job history capacity; entries beyond this are rejected
    pub history_capacity: usize,

    /// Only schedule tasks explicitly opted in (host honors this at attach)
    pub switch_partial: bool,
}

impl SchedConfig {
    /// Create default parameters
    pub const fn new() -> Self {
        Self {
            slice_ns: DEFAULT_SLICE_NS,
            target_cpu: DEFAULT_TARGET_CPU,
            queue_ids: DEFAULT_QUEUE_IDS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            switch_partial: false,
        }
    }

    /// Override the time slice
    pub const fn with_slice_ns(mut self, slice_ns: u64) -> Self {
        self.slice_ns = slice_ns;
        self
    }

    /// Override the target CPU
    pub const fn with_target_cpu(mut self, cpu: CpuId) -> Self {
        self.target_cpu = cpu;
        self
    }

    /// Override the dispatch queue ids
    pub const fn with_queue_ids(mut self, ids: [QueueId; 2]) -> Self {
        self.queue_ids = ids;
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> SchedResult<()> {
        if self.slice_ns == 0 {
            return Err(SchedError::InvalidConfig {
                reason: "slice must be nonzero",
            });
        }
        if self.history_capacity == 0 {
            return Err(SchedError::InvalidConfig {
                reason: "history capacity must be nonzero",
            });
        }
        Ok(())
    }
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self::new()
    }
}
