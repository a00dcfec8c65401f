//! Statistics - Scheduler event counters
//!
//! Fixed set of monotonically increasing counters, sharded per
//! execution unit so hot-path increments never contend, summed into a
//! single aggregate at snapshot time for the external monitor.

use crate::task::CpuId;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Number of exported counters
pub const NR_COUNTERS: usize = 4;

/// Number of counter shards (power of two)
const NR_SHARDS: usize = 16;

/// Counter identifiers; the discriminants are the export indices the
/// monitor reads and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Counter {
    /// Tasks that started executing
    Started = 0,
    /// Tasks that came off the CPU
    Stopped = 1,
    /// Tasks handed to the CPU by dispatch
    Dispatched = 2,
    /// Dispatches that changed which task holds the CPU
    Switches = 3,
}

impl Counter {
    pub const ALL: [Counter; NR_COUNTERS] = [
        Counter::Started,
        Counter::Stopped,
        Counter::Dispatched,
        Counter::Switches,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One cache line per shard so parallel units never false-share
#[repr(align(64))]
struct Shard {
    counters: [AtomicU64; NR_COUNTERS],
}

impl Shard {
    const fn new() -> Self {
        const ZERO: AtomicU64 = AtomicU64::new(0);
        Self {
            counters: [ZERO; NR_COUNTERS],
        }
    }
}

/// Sharded scheduler counters
pub struct StatsCounters {
    shards: [Shard; NR_SHARDS],
}

impl StatsCounters {
    pub const fn new() -> Self {
        const SHARD: Shard = Shard::new();
        Self {
            shards: [SHARD; NR_SHARDS],
        }
    }

    /// Increment a counter from the given execution unit
    #[inline]
    pub fn inc(&self, counter: Counter, cpu: CpuId) {
        let shard = cpu as usize & (NR_SHARDS - 1);
        self.shards[shard].counters[counter.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Sum all shards into one aggregate per counter. Reads are
    /// relaxed and never block producers.
    pub fn snapshot(&self) -> StatsSnapshot {
        let mut counts = [0u64; NR_COUNTERS];
        for shard in &self.shards {
            for (total, counter) in counts.iter_mut().zip(shard.counters.iter()) {
                *total += counter.load(Ordering::Relaxed);
            }
        }
        StatsSnapshot { counts }
    }
}

impl Default for StatsCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregated counter values at one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub counts: [u64; NR_COUNTERS],
}

impl StatsSnapshot {
    #[inline]
    pub fn get(&self, counter: Counter) -> u64 {
        self.counts[counter.index()]
    }

    pub fn started(&self) -> u64 {
        self.get(Counter::Started)
    }

    pub fn stopped(&self) -> u64 {
        self.get(Counter::Stopped)
    }

    pub fn dispatched(&self) -> u64 {
        self.get(Counter::Dispatched)
    }

    pub fn switches(&self) -> u64 {
        self.get(Counter::Switches)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "started={} stopped={} dispatched={} switches={}",
            self.started(),
            self.stopped(),
            self.dispatched(),
            self.switches()
        )
    }
}
