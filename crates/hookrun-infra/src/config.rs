//! Trigger file loader.
//!
//! Reads the YAML trigger file, validates every entry and builds the
//! [`TriggerRegistry`]. Unlike a lenient config loader, any problem here is
//! fatal: a missing file, malformed YAML, an entry with a missing or empty
//! field, a duplicate id, or a script that is not executable.

use std::path::{Path, PathBuf};

use hookrun_core::registry::TriggerRegistry;
use hookrun_types::config::TriggersFile;
use hookrun_types::error::ConfigError;
use hookrun_types::trigger::Trigger;

use crate::script::executable::is_executable;

/// Default trigger file path, relative to the working directory.
pub const DEFAULT_TRIGGERS_FILE: &str = "./triggers.yaml";

/// Load and validate the trigger file at `path`.
///
/// Script paths are canonicalized so they stay valid regardless of the
/// working directory a run is spawned in.
pub async fn load_triggers(path: &Path) -> Result<TriggerRegistry, ConfigError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let triggers = parse_triggers(&content)?;
    let mut resolved = Vec::with_capacity(triggers.len());
    for trigger in triggers {
        resolved.push(resolve_script(trigger).await?);
    }

    let registry = TriggerRegistry::new(resolved)?;
    tracing::info!(
        path = %path.display(),
        count = registry.len(),
        "Using {} as the config file",
        path.display()
    );
    Ok(registry)
}

/// Parse and validate the document without touching the filesystem.
pub fn parse_triggers(content: &str) -> Result<Vec<Trigger>, ConfigError> {
    let file: TriggersFile =
        serde_yaml_ng::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    file.validate()
}

async fn resolve_script(trigger: Trigger) -> Result<Trigger, ConfigError> {
    let not_executable = |trigger: &Trigger| ConfigError::NotExecutable {
        id: trigger.id.clone(),
        script: trigger.script.clone(),
    };

    if !is_executable(&trigger.script) {
        return Err(not_executable(&trigger));
    }
    let script: PathBuf = match tokio::fs::canonicalize(&trigger.script).await {
        Ok(script) => script,
        Err(_) => return Err(not_executable(&trigger)),
    };
    Ok(Trigger { script, ..trigger })
}
