//! Policy engine
//!
//! The hook interface the host scheduling subsystem calls into, the
//! exit record it reads back, and the virtual-time SJF engine that
//! implements the hooks.

pub mod engine;
pub mod exit;
pub mod hooks;

pub use engine::{EngineState, SjfScheduler};
pub use exit::{ExitInfo, ExitKind};
pub use hooks::{EnqueueFlags, SchedPolicy, WakeFlags};
