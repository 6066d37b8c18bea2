//! Script execution port.
//!
//! Defines the [`ScriptExecutor`] trait the runner drives. The process-based
//! implementation lives in `hookrun-infra`; tests use in-memory fakes.

use hookrun_types::error::RunError;
use hookrun_types::trigger::Trigger;

/// How a script process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptExit {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ScriptExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a trigger's script to completion.
///
/// Implementations must verify the script is still executable, spawn it in
/// the trigger's working directory, forward its output to the log, and
/// resolve once the process exits. There is no timeout: a hung script keeps
/// the returned future pending.
pub trait ScriptExecutor: Send + Sync + 'static {
    fn execute(
        &self,
        trigger: &Trigger,
    ) -> impl std::future::Future<Output = Result<ScriptExit, RunError>> + Send;
}
