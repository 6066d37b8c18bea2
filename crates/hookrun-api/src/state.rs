//! Application state wiring the registry, store, runner and dispatcher.
//!
//! The dispatcher is generic over its script executor; AppState pins it to
//! the process-backed executor from `hookrun-infra`.

use std::path::Path;
use std::sync::Arc;

use hookrun_core::dispatch::Dispatcher;
use hookrun_core::registry::TriggerRegistry;
use hookrun_core::task::runner::TaskRunner;
use hookrun_core::task::store::TaskStateStore;
use hookrun_infra::config::load_triggers;
use hookrun_infra::script::process::ProcessScriptExecutor;

/// Concrete dispatcher type pinned to the infra executor.
pub type ConcreteDispatcher = Dispatcher<ProcessScriptExecutor>;

/// Shared application state, cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ConcreteDispatcher>,
}

impl AppState {
    /// Load the trigger file and wire the services.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let registry = load_triggers(config_path).await?;
        Ok(Self::from_registry(registry))
    }

    /// Wire services around an already-loaded registry.
    pub fn from_registry(registry: TriggerRegistry) -> Self {
        let runner = TaskRunner::new(
            Arc::new(TaskStateStore::new()),
            Arc::new(ProcessScriptExecutor::new()),
        );
        Self::with_runner(registry, runner)
    }

    pub fn with_runner(
        registry: TriggerRegistry,
        runner: TaskRunner<ProcessScriptExecutor>,
    ) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(Arc::new(registry), runner)),
        }
    }
}
