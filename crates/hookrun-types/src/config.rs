//! Trigger file document types.
//!
//! The trigger file is a YAML document with a single `triggers` list:
//!
//! ```yaml
//! triggers:
//!   - id: deploy-prod
//!     token: abc123
//!     script: /srv/deploy.sh
//! ```
//!
//! Fields are optional at the serde level so that a missing field reports
//! which entry and field is wrong instead of a generic parse error.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::trigger::Trigger;

/// Top-level trigger file.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggersFile {
    pub triggers: Vec<TriggerEntry>,
}

/// One raw, unvalidated trigger entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
}

impl TriggerEntry {
    /// Check that every field is present and non-empty.
    ///
    /// `index` is the 1-based position in the file, used in error messages.
    /// Script executability is checked by the loader, not here.
    pub fn validate(&self, index: usize) -> Result<Trigger, ConfigError> {
        let id = required(&self.id, index, "id")?;
        let token = required(&self.token, index, "token")?;
        let script = required(&self.script, index, "script")?;
        Ok(Trigger::new(id, token, script))
    }
}

impl TriggersFile {
    /// Validate all entries, rejecting the whole file on the first bad one.
    ///
    /// Id uniqueness is enforced when the registry is built.
    pub fn validate(&self) -> Result<Vec<Trigger>, ConfigError> {
        self.triggers
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.validate(i + 1))
            .collect()
    }
}

fn required<'a>(
    value: &'a Option<String>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::InvalidField { index, field }),
    }
}
