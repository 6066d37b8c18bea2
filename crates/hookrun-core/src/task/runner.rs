//! Task runner: starts script runs and handles their completion.
//!
//! [`TaskRunner::trigger`] returns as soon as a run is initiated. The run
//! itself lives in a spawned tokio task whose continuation records the exit
//! in the [`TaskStateStore`] and, when trigger requests arrived during the
//! run, schedules exactly one more run after [`RESTART_DELAY`].

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use hookrun_types::task::TriggerOutcome;
use hookrun_types::trigger::Trigger;

use crate::task::executor::ScriptExecutor;
use crate::task::store::TaskStateStore;

/// Delay between the end of a run and its coalesced restart.
pub const RESTART_DELAY: Duration = Duration::from_secs(1);

/// Spawns script runs through a [`ScriptExecutor`] and tracks them.
pub struct TaskRunner<E> {
    store: Arc<TaskStateStore>,
    executor: Arc<E>,
    restart_delay: Duration,
}

impl<E> Clone for TaskRunner<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            executor: Arc::clone(&self.executor),
            restart_delay: self.restart_delay,
        }
    }
}

impl<E: ScriptExecutor> TaskRunner<E> {
    pub fn new(store: Arc<TaskStateStore>, executor: Arc<E>) -> Self {
        Self {
            store,
            executor,
            restart_delay: RESTART_DELAY,
        }
    }

    /// Override the restart delay.
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    pub fn store(&self) -> &Arc<TaskStateStore> {
        &self.store
    }

    /// Start a run for `trigger`, or coalesce into the run in progress.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&self, trigger: &Trigger) -> TriggerOutcome {
        if self.store.upsert_running(&trigger.id).already_running {
            tracing::info!(
                trigger_id = %trigger.id,
                "run in progress, restart scheduled after completion"
            );
            return TriggerOutcome::Coalesced;
        }

        let run_id = Uuid::now_v7();
        let span = tracing::info_span!("run", trigger_id = %trigger.id, %run_id);
        let runner = self.clone();
        let trigger = trigger.clone();
        tokio::spawn(async move { runner.run_to_completion(trigger).await }.instrument(span));

        TriggerOutcome::Started
    }

    async fn run_to_completion(self, trigger: Trigger) {
        let success = match self.executor.execute(&trigger).await {
            Ok(exit) => {
                match exit.code {
                    Some(code) => tracing::info!(exit_code = code, "DONE (status {code})"),
                    None => tracing::info!("DONE (terminated by signal)"),
                }
                exit.success()
            }
            Err(e) => {
                tracing::error!(error = %e, "run aborted");
                false
            }
        };

        let outcome = self.store.complete_run(&trigger.id, success);
        if outcome.should_restart {
            tracing::info!(
                delay_ms = self.restart_delay.as_millis() as u64,
                "restarting for requests received during the run"
            );
            tokio::time::sleep(self.restart_delay).await;
            self.trigger(&trigger);
        }
    }
}
