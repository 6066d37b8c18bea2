//! Trigger domain type.
//!
//! A trigger is a named, token-protected binding to an executable script.
//! Triggers are loaded once at startup and never change afterwards.

use std::path::{Path, PathBuf};

/// A validated trigger definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Unique identifier, also the URL path segment (`/{id}`).
    pub id: String,
    /// Shared secret expected in the `Authorization: Bearer` header.
    pub token: String,
    /// Path to the executable script spawned on each run.
    pub script: PathBuf,
}

impl Trigger {
    pub fn new(id: impl Into<String>, token: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            script: script.into(),
        }
    }

    /// Directory the script runs in (the script's parent directory).
    ///
    /// Falls back to `.` for bare file names.
    pub fn working_dir(&self) -> &Path {
        match self.script.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}
