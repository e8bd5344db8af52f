//! Per-target dispatch results.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Succeeded,
    InputNotFound,
    InjectionFailed,
    TimedOut,
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchStatus::Succeeded => "succeeded",
            DispatchStatus::InputNotFound => "input-not-found",
            DispatchStatus::InjectionFailed => "injection-failed",
            DispatchStatus::TimedOut => "timed-out",
        };
        f.write_str(s)
    }
}

/// Result of one dispatch. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub tab_id: String,
    pub status: DispatchStatus,
    pub detail: Option<String>,
}

impl DispatchOutcome {
    pub fn succeeded(tab_id: impl Into<String>) -> Self {
        Self {
            tab_id: tab_id.into(),
            status: DispatchStatus::Succeeded,
            detail: None,
        }
    }

    pub fn failed(tab_id: impl Into<String>, status: DispatchStatus, detail: impl Into<String>) -> Self {
        Self {
            tab_id: tab_id.into(),
            status,
            detail: Some(detail.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DispatchStatus::Succeeded
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {} ({detail})", self.tab_id, self.status),
            None => write!(f, "{}: {}", self.tab_id, self.status),
        }
    }
}
