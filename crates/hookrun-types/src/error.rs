use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the trigger file. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the config file {} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the triggers file does not contain valid YAML data: {0}")]
    Parse(String),

    #[error("invalid trigger entry #{index}: the '{field}' field must be a non-empty string")]
    InvalidField { index: usize, field: &'static str },

    #[error("script for trigger '{id}' is not executable: {}", .script.display())]
    NotExecutable { id: String, script: PathBuf },

    #[error("trigger id '{0}' is defined more than once")]
    DuplicateId(String),
}

/// Errors from a single script run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("script is no longer executable: {}", .0.display())]
    NotExecutable(PathBuf),

    #[error("failed to spawn {}: {source}", .script.display())]
    Spawn {
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for script process: {0}")]
    Wait(#[source] std::io::Error),
}

/// Reasons a request is refused by the dispatcher.
///
/// Both variants surface to HTTP clients as the same `404 Not Found`;
/// the distinction only exists for operational logging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Missing id or header, no `Bearer ` prefix, or unknown trigger id.
    #[error("request does not address a known trigger")]
    NotMatched,

    /// Known trigger id but the bearer credential does not match its token.
    #[error("invalid token for trigger '{0}'")]
    InvalidToken(String),
}
