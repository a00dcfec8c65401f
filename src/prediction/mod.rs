//! Runtime prediction scaffolding
//!
//! Per-task execution history with an EMA-smoothed predicted runtime.
//! The store is populated on every run but nothing in enqueue or
//! dispatch reads it back: ordering comes from observed virtual time
//! only. The predicted value is an extension point, not an input.

pub mod ema;
pub mod history;

pub use ema::RuntimeEma;
pub use history::{JobHistory, JobInfo};
