//! Task lifecycle types.
//!
//! A task is the runtime state of a trigger's most recent (or ongoing)
//! invocation. `Unstarted` is never stored: it is what a lookup reports
//! for a trigger that has no task entry yet.

use std::fmt;

use serde::Serialize;

/// Status of a trigger's latest invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// The trigger has never been invoked.
    Unstarted,
    /// A script process is currently running.
    Running,
    /// The last run exited with code 0.
    Done,
    /// The last run exited non-zero, was killed, or could not be spawned.
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Unstarted => "unstarted",
            TaskStatus::Running => "running",
            TaskStatus::Done => "done",
            TaskStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored state for a trigger that has been invoked at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Owning trigger's id.
    pub id: String,
    /// Never `Unstarted` for a stored task.
    pub status: TaskStatus,
    /// Set when a trigger request arrives while `status == Running`.
    pub restart_on_completion: bool,
}

impl Task {
    /// A freshly started task.
    pub fn running(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: TaskStatus::Running,
            restart_on_completion: false,
        }
    }
}

/// Body of a status query response: `{"id": ..., "status": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub id: String,
    pub status: TaskStatus,
}

/// Result of asking the runner to start a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A new run was initiated.
    Started,
    /// A run is in progress; one restart is pending after it completes.
    Coalesced,
}

impl TriggerOutcome {
    /// Plain-text body returned to the HTTP caller.
    pub fn message(&self) -> &'static str {
        match self {
            TriggerOutcome::Started => "OK",
            TriggerOutcome::Coalesced => "Already running, will restart when completed",
        }
    }
}
