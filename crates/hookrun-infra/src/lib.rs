//! Infrastructure layer for hookrun.
//!
//! Contains the IO-bound implementations behind `hookrun-core`: loading and
//! validating the YAML trigger file, and running trigger scripts as child
//! processes via `tokio::process`.

pub mod config;
pub mod script;
