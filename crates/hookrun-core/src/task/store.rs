//! In-memory task state store.
//!
//! Maps trigger id to the state of its latest run. Every mutation goes
//! through a `DashMap` entry guard, so the read-then-write in
//! [`TaskStateStore::upsert_running`] is atomic per id: two simultaneous
//! trigger requests for the same id can never both observe "not running".
//!
//! Entries are never removed.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use hookrun_types::task::{Task, TaskStatus};

/// Result of [`TaskStateStore::upsert_running`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// A run was already in progress. The caller must not spawn a process;
    /// the restart flag has been set instead.
    pub already_running: bool,
}

/// Result of [`TaskStateStore::complete_run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// A trigger request arrived during the run; schedule exactly one more.
    pub should_restart: bool,
}

/// Thread-safe table of task states keyed by trigger id.
#[derive(Debug, Default)]
pub struct TaskStateStore {
    tasks: DashMap<String, Task>,
}

impl TaskStateStore {
    pub fn new() -> Self {
        Self {
            tasks: DashMap::new(),
        }
    }

    /// Status of the latest run, or `Unstarted` if the id was never triggered.
    pub fn status(&self, id: &str) -> TaskStatus {
        self.tasks
            .get(id)
            .map(|task| task.status)
            .unwrap_or(TaskStatus::Unstarted)
    }

    /// Snapshot of the stored task, if any.
    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<Task> {
        self.tasks.get(id).map(|task| task.value().clone())
    }

    /// Mark the task as running, or flag it for restart if it already is.
    pub fn upsert_running(&self, id: &str) -> UpsertOutcome {
        match self.tasks.entry(id.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(Task::running(id));
                UpsertOutcome {
                    already_running: false,
                }
            }
            Entry::Occupied(mut entry) => {
                let task = entry.get_mut();
                if task.status == TaskStatus::Running {
                    task.restart_on_completion = true;
                    UpsertOutcome {
                        already_running: true,
                    }
                } else {
                    task.status = TaskStatus::Running;
                    task.restart_on_completion = false;
                    UpsertOutcome {
                        already_running: false,
                    }
                }
            }
        }
    }

    /// Record the end of a run and consume the restart flag.
    pub fn complete_run(&self, id: &str, success: bool) -> CompletionOutcome {
        let mut task = self
            .tasks
            .entry(id.to_string())
            .or_insert_with(|| Task::running(id));
        task.status = if success {
            TaskStatus::Done
        } else {
            TaskStatus::Failed
        };
        let should_restart = std::mem::take(&mut task.restart_on_completion);
        CompletionOutcome { should_restart }
    }

    /// Number of triggers that have been invoked at least once.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
