//! Read-only trigger registry.
//!
//! Built once at startup from validated triggers and shared behind an `Arc`
//! for the life of the process.

use std::collections::HashMap;

use hookrun_types::error::ConfigError;
use hookrun_types::trigger::Trigger;

/// Maps trigger id to its definition.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: HashMap<String, Trigger>,
}

impl TriggerRegistry {
    /// Build the registry. Duplicate ids are rejected.
    pub fn new(triggers: Vec<Trigger>) -> Result<Self, ConfigError> {
        let mut map = HashMap::with_capacity(triggers.len());
        for trigger in triggers {
            if map.contains_key(&trigger.id) {
                return Err(ConfigError::DuplicateId(trigger.id));
            }
            map.insert(trigger.id.clone(), trigger);
        }
        Ok(Self { triggers: map })
    }

    /// Look up a trigger by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Trigger> {
        self.triggers.get(id)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.triggers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
