//! Scheduler Error Handling
//!
//! Typed errors for activation and state-machine operations.
//! Hook bodies stay infallible per the host ABI; fallibility is
//! confined to configuration and one-time initialization.

use crate::task::{TaskId, TaskState};
use core::fmt;

/// Queue identifier (process-unique, nonzero).
pub type QueueId = u64;

/// Scheduler error types with context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// Configuration rejected before activation
    InvalidConfig { reason: &'static str },

    /// Queue id is reserved (zero) or otherwise unusable
    InvalidQueueId { id: QueueId },

    /// Queue id already taken by another queue of this engine
    QueueIdInUse { id: QueueId },

    /// Engine already activated (init called twice)
    AlreadyInitialized,

    /// Hook invoked before successful init
    NotInitialized,

    /// Job history store at capacity, entry rejected
    HistoryFull { capacity: usize },

    /// Invalid task state transition
    InvalidStateTransition {
        task: TaskId,
        from: TaskState,
        to: TaskState,
    },
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            Self::InvalidQueueId { id } => {
                write!(f, "Invalid queue id {}", id)
            }
            Self::QueueIdInUse { id } => {
                write!(f, "Queue id {} already in use", id)
            }
            Self::AlreadyInitialized => write!(f, "Scheduler already initialized"),
            Self::NotInitialized => write!(f, "Scheduler not initialized"),
            Self::HistoryFull { capacity } => {
                write!(f, "Job history full ({} entries)", capacity)
            }
            Self::InvalidStateTransition { task, from, to } => {
                write!(f, "Task {}: invalid transition {} -> {}", task, from, to)
            }
        }
    }
}

impl SchedError {
    /// Errno-style status code for the activation contract
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } => -22,         // EINVAL
            Self::InvalidQueueId { .. } => -22,        // EINVAL
            Self::QueueIdInUse { .. } => -17,          // EEXIST
            Self::AlreadyInitialized => -114,          // EALREADY
            Self::NotInitialized => -19,               // ENODEV
            Self::HistoryFull { .. } => -105,          // ENOBUFS
            Self::InvalidStateTransition { .. } => -22, // EINVAL
        }
    }

    /// Is this a recoverable error?
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::HistoryFull { .. } => true,
            Self::InvalidStateTransition { .. } => true,
            _ => false,
        }
    }
}

/// Result type for scheduler operations
pub type SchedResult<T> = Result<T, SchedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_negative() {
        assert!(SchedError::QueueIdInUse { id: 101 }.code() < 0);
        assert!(SchedError::AlreadyInitialized.code() < 0);
        assert_eq!(SchedError::InvalidConfig { reason: "x" }.code(), -22);
    }

    #[test]
    fn test_recoverability() {
        assert!(SchedError::HistoryFull { capacity: 4096 }.is_recoverable());
        assert!(!SchedError::NotInitialized.is_recoverable());
    }
}
