//! Exit Record
//!
//! Reason a policy engine deactivated. The engine only records this;
//! the external monitor decides whether to reload or terminate.

use alloc::string::String;
use core::fmt;

/// Why the engine exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    /// Orderly shutdown, no reload expected
    Shutdown,

    /// The policy asks to be reloaded with fully reset state
    Restart,

    /// Deactivated on error
    Error,
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "shutdown"),
            Self::Restart => write!(f, "restart"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Exit reason plus diagnostics for the monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitInfo {
    pub kind: ExitKind,
    pub code: i64,
    pub message: String,
}

impl ExitInfo {
    pub fn shutdown(message: &str) -> Self {
        Self {
            kind: ExitKind::Shutdown,
            code: 0,
            message: String::from(message),
        }
    }

    pub fn restart(message: &str) -> Self {
        Self {
            kind: ExitKind::Restart,
            code: 0,
            message: String::from(message),
        }
    }

    pub fn error(code: i64, message: &str) -> Self {
        Self {
            kind: ExitKind::Error,
            code,
            message: String::from(message),
        }
    }

    /// Should the monitor reload the engine with reset state?
    pub fn is_restart(&self) -> bool {
        self.kind == ExitKind::Restart
    }
}

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {}): {}", self.kind, self.code, self.message)
    }
}
